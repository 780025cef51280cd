//! In-memory integration tests for the task lifecycle.

use super::helpers::Campus;
use chrono::Duration;
use lyceum::{
    error::ErrorKind,
    task::{
        domain::{DueWindow, TaskKind, TaskPatch, TaskQuery, TaskStatus},
        services::CreateTaskRequest,
    },
};
use rstest::rstest;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn assignment_moves_from_pending_to_overdue_to_completed() -> Result<(), eyre::Report> {
    let campus = Campus::new()?;
    let admin = campus.login("Grace", "admin").await?;
    let student = campus.login("Ada", "student").await?;
    let essay = campus
        .tasks
        .create(
            &admin,
            CreateTaskRequest::assignment("Essay", "History", "2025-03-05T09:00:00Z")
                .with_priority("HIGH"),
        )
        .await?;
    eyre::ensure!(essay.status == TaskStatus::Pending, "got {}", essay.status);
    eyre::ensure!(essay.days_left == 2, "got {} days", essay.days_left);

    campus.clock.advance(Duration::days(3));
    let late = campus.tasks.get(&student, essay.task.id()).await?;
    eyre::ensure!(late.status == TaskStatus::Overdue, "got {}", late.status);
    eyre::ensure!(late.days_left == -1, "got {} days", late.days_left);

    let done = campus
        .tasks
        .update(&student, essay.task.id(), &TaskPatch::completion(true))
        .await?;
    eyre::ensure!(done.status == TaskStatus::Completed, "got {}", done.status);

    let reopened = campus
        .tasks
        .update(&student, essay.task.id(), &TaskPatch::completion(false))
        .await?;
    eyre::ensure!(reopened.status == TaskStatus::Overdue, "got {}", reopened.status);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn students_cannot_create_tasks() -> Result<(), eyre::Report> {
    let campus = Campus::new()?;
    let student = campus.login("Ada", "user").await?;

    let err = campus
        .tasks
        .create(
            &student,
            CreateTaskRequest::assignment("Essay", "History", "2025-03-05"),
        )
        .await
        .err()
        .ok_or_else(|| eyre::eyre!("student created a task"))?;

    eyre::ensure!(err.kind() == ErrorKind::Forbidden, "got {:?}", err.kind());
    eyre::ensure!(campus.tasks.list_all(&student).await?.is_empty(), "row written");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn due_windows_order_by_days_left() -> Result<(), eyre::Report> {
    let campus = Campus::new()?;
    let admin = campus.login("Grace", "admin").await?;
    for (title, due) in [
        ("Lab report", "2025-03-08T09:00:00Z"),
        ("Reading", "2025-03-03T09:00:00Z"),
        ("Problem set", "2025-03-04T09:00:00Z"),
        ("Thesis", "2025-03-14T09:00:00Z"),
    ] {
        campus
            .tasks
            .create(&admin, CreateTaskRequest::assignment(title, "Science", due))
            .await?;
    }

    let week = campus
        .tasks
        .list(
            &admin,
            &TaskQuery {
                due: Some(DueWindow::DueThisWeek),
                ..TaskQuery::default()
            },
        )
        .await?;
    let week_titles: Vec<&str> = week.iter().map(|view| view.task.title()).collect();
    eyre::ensure!(
        week_titles == ["Reading", "Problem set", "Lab report"],
        "got {week_titles:?}"
    );

    let next_week = campus
        .tasks
        .list(
            &admin,
            &TaskQuery {
                due: Some(DueWindow::DueNextWeek),
                ..TaskQuery::default()
            },
        )
        .await?;
    let next_titles: Vec<&str> = next_week.iter().map(|view| view.task.title()).collect();
    eyre::ensure!(next_titles == ["Thesis"], "got {next_titles:?}");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn facets_report_subjects_and_stored_statuses() -> Result<(), eyre::Report> {
    let campus = Campus::new()?;
    let admin = campus.login("Grace", "admin").await?;
    campus
        .tasks
        .create(
            &admin,
            CreateTaskRequest::assignment("Essay", "History", "2025-03-01"),
        )
        .await?;
    campus
        .tasks
        .create(
            &admin,
            CreateTaskRequest::exam("Midterm", "Algebra", "2025-03-20T10:00:00Z", 90)
                .with_details("Hall B"),
        )
        .await?;

    let facets = campus.meta.facets(&admin).await?;

    let subjects: Vec<&str> = facets.subjects.iter().map(String::as_str).collect();
    let statuses: Vec<&str> = facets.statuses.iter().map(String::as_str).collect();
    eyre::ensure!(subjects == ["Algebra", "History"], "got {subjects:?}");
    eyre::ensure!(statuses == ["pending", "upcoming"], "got {statuses:?}");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn kind_and_status_filters_combine() -> Result<(), eyre::Report> {
    let campus = Campus::new()?;
    let admin = campus.login("Grace", "admin").await?;
    let exam = campus
        .tasks
        .create(
            &admin,
            CreateTaskRequest::exam("Final", "Algebra", "2025-03-01T10:00:00Z", 120),
        )
        .await?;
    campus
        .tasks
        .create(
            &admin,
            CreateTaskRequest::assignment("Homework", "Algebra", "2025-03-01"),
        )
        .await?;

    let exams = campus
        .tasks
        .list(
            &admin,
            &TaskQuery {
                kind: Some(TaskKind::Exam),
                status: Some(TaskStatus::Upcoming),
                ..TaskQuery::default()
            },
        )
        .await?;
    let overdue = campus
        .tasks
        .list(
            &admin,
            &TaskQuery {
                status: Some(TaskStatus::Overdue),
                ..TaskQuery::default()
            },
        )
        .await?;

    // A past exam keeps its stored status.
    eyre::ensure!(exams.len() == 1, "got {} exams", exams.len());
    eyre::ensure!(
        exams.first().map(|view| view.task.id()) == Some(exam.task.id()),
        "wrong exam"
    );
    let titles: Vec<&str> = overdue.iter().map(|view| view.task.title()).collect();
    eyre::ensure!(titles == ["Homework"], "got {titles:?}");
    Ok(())
}
