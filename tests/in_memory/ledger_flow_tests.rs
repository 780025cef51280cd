//! In-memory integration tests for submissions and exam results.

use super::helpers::Campus;
use chrono::Duration;
use lyceum::{
    config::LedgerConfig,
    error::ErrorKind,
    ledger::domain::{ResubmissionPolicy, ResultFilter},
    task::{
        domain::{TaskId, TaskStatus},
        services::CreateTaskRequest,
    },
};
use rstest::rstest;
use serde_json::json;

async fn assignment(campus: &Campus, title: &str) -> Result<TaskId, eyre::Report> {
    let admin = campus.login("Grace", "admin").await?;
    let view = campus
        .tasks
        .create(
            &admin,
            CreateTaskRequest::assignment(title, "History", "2025-03-10T17:00:00Z"),
        )
        .await?;
    Ok(view.task.id())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn submission_completes_the_assignment() -> Result<(), eyre::Report> {
    let campus = Campus::new()?;
    let essay = assignment(&campus, "Essay").await?;
    let ada = campus.login("Ada", "student").await?;

    let receipt = campus
        .ledger
        .submit_assignment(&ada, essay, "The causes of the war")
        .await?;

    eyre::ensure!(receipt.task.id == essay, "receipt names another task");
    eyre::ensure!(
        receipt.user.as_ref().map(|user| user.name.as_str()) == Some("Ada"),
        "receipt lacks the author"
    );
    let view = campus.tasks.get(&ada, essay).await?;
    eyre::ensure!(view.status == TaskStatus::Completed, "got {}", view.status);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn deleting_an_assignment_removes_its_submissions() -> Result<(), eyre::Report> {
    let campus = Campus::new()?;
    let essay = assignment(&campus, "Essay").await?;
    let ada = campus.login("Ada", "student").await?;
    let alan = campus.login("Alan", "student").await?;
    campus.ledger.submit_assignment(&ada, essay, "draft").await?;
    campus.ledger.submit_assignment(&alan, essay, "final").await?;
    let admin = campus.login("Root", "admin").await?;

    let before = campus.ledger.list_submissions(&admin, essay).await?;
    campus.tasks.delete(&admin, essay).await?;
    let after = campus.ledger.list_submissions(&admin, essay).await?;

    eyre::ensure!(before.len() == 2, "got {} submissions", before.len());
    eyre::ensure!(after.is_empty(), "{} submissions survived", after.len());
    let gone = campus
        .tasks
        .get(&admin, essay)
        .await
        .err()
        .ok_or_else(|| eyre::eyre!("task survived deletion"))?;
    eyre::ensure!(gone.kind() == ErrorKind::NotFound, "got {:?}", gone.kind());
    Ok(())
}

#[rstest]
#[case::append(ResubmissionPolicy::Append, 2)]
#[case::reject(ResubmissionPolicy::Reject, 1)]
#[tokio::test(flavor = "multi_thread")]
async fn resubmission_follows_configuration(
    #[case] policy: ResubmissionPolicy,
    #[case] kept: usize,
) -> Result<(), eyre::Report> {
    let campus = Campus::with_ledger(LedgerConfig {
        assignment_resubmission: policy,
        ..LedgerConfig::default()
    })?;
    let essay = assignment(&campus, "Essay").await?;
    let ada = campus.login("Ada", "student").await?;
    campus.ledger.submit_assignment(&ada, essay, "first").await?;
    campus.clock.advance(Duration::minutes(5));

    let second = campus.ledger.submit_assignment(&ada, essay, "second").await;

    match policy {
        ResubmissionPolicy::Append => eyre::ensure!(second.is_ok(), "got {second:?}"),
        ResubmissionPolicy::Reject => eyre::ensure!(
            second
                .as_ref()
                .is_err_and(|err| err.kind() == ErrorKind::Conflict),
            "got {second:?}"
        ),
    }
    let stored = campus.ledger.list_submissions(&ada, essay).await?;
    eyre::ensure!(stored.len() == kept, "got {} submissions", stored.len());
    let latest = campus
        .ledger
        .latest_submission(&ada, essay, ada.user_id())
        .await?
        .ok_or_else(|| eyre::eyre!("no latest submission"))?;
    let expected = if kept == 2 { "second" } else { "first" };
    eyre::ensure!(
        latest.submission.content() == expected,
        "latest is {}",
        latest.submission.content()
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn exam_results_list_newest_first() -> Result<(), eyre::Report> {
    let campus = Campus::new()?;
    let admin = campus.login("Grace", "admin").await?;
    let ada = campus.login("Ada", "student").await?;
    let alan = campus.login("Alan", "student").await?;
    let midterm = campus
        .tasks
        .create(
            &admin,
            CreateTaskRequest::exam("Midterm", "Algebra", "2025-03-04T10:00:00Z", 90),
        )
        .await?
        .task
        .id();
    let quiz = campus
        .tasks
        .create(
            &admin,
            CreateTaskRequest::exam("Quiz", "Algebra", "2025-03-05T10:00:00Z", 20),
        )
        .await?
        .task
        .id();

    campus
        .ledger
        .submit_exam_result(&ada, midterm, &json!(71), None)
        .await?;
    campus.clock.advance(Duration::hours(1));
    campus
        .ledger
        .submit_exam_result(&ada, quiz, &json!(9), Some(json!({"section": "B"})))
        .await?;
    campus.clock.advance(Duration::hours(1));
    campus
        .ledger
        .submit_exam_result(&alan, midterm, &json!(88), None)
        .await?;

    let mine = campus.ledger.my_results(&ada).await?;
    let titles: Vec<Option<&str>> = mine
        .iter()
        .map(|entry| entry.exam.as_ref().map(|exam| exam.title.as_str()))
        .collect();
    eyre::ensure!(titles == [Some("Quiz"), Some("Midterm")], "got {titles:?}");

    let midterm_scores: Vec<u64> = campus
        .ledger
        .all_results(
            &admin,
            &ResultFilter {
                exam_id: Some(midterm),
                user_id: None,
            },
        )
        .await?
        .iter()
        .map(|entry| entry.result.score().value())
        .collect();
    eyre::ensure!(midterm_scores == [88, 71], "got {midterm_scores:?}");

    let forbidden = campus
        .ledger
        .all_results(&ada, &ResultFilter::default())
        .await
        .err()
        .ok_or_else(|| eyre::eyre!("student listed all results"))?;
    eyre::ensure!(forbidden.kind() == ErrorKind::Forbidden, "got {:?}", forbidden.kind());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn whole_float_scores_are_stored_as_integers() -> Result<(), eyre::Report> {
    let campus = Campus::new()?;
    let admin = campus.login("Grace", "admin").await?;
    let ada = campus.login("Ada", "student").await?;
    let exam = campus
        .tasks
        .create(
            &admin,
            CreateTaskRequest::exam("Final", "Algebra", "2025-03-20T10:00:00Z", 120),
        )
        .await?
        .task
        .id();

    campus
        .ledger
        .submit_exam_result(&ada, exam, &json!(88.0), None)
        .await?;

    let results = campus.ledger.my_results(&ada).await?;
    eyre::ensure!(results.len() == 1, "expected one result, got {}", results.len());
    let stored = results.first().map(|entry| entry.result.score().value());
    eyre::ensure!(stored == Some(88), "stored score {stored:?}");
    Ok(())
}

#[rstest]
#[case::negative(json!(-3))]
#[case::fraction(json!(7.5))]
#[case::text(json!("90"))]
#[case::missing(json!(null))]
#[tokio::test(flavor = "multi_thread")]
async fn malformed_scores_are_bad_requests(
    #[case] score: serde_json::Value,
) -> Result<(), eyre::Report> {
    let campus = Campus::new()?;
    let admin = campus.login("Grace", "admin").await?;
    let ada = campus.login("Ada", "student").await?;
    let exam = campus
        .tasks
        .create(
            &admin,
            CreateTaskRequest::exam("Final", "Algebra", "2025-03-20T10:00:00Z", 120),
        )
        .await?
        .task
        .id();

    let err = campus
        .ledger
        .submit_exam_result(&ada, exam, &score, None)
        .await
        .err()
        .ok_or_else(|| eyre::eyre!("score {score} accepted"))?;

    eyre::ensure!(err.kind() == ErrorKind::BadRequest, "got {:?}", err.kind());
    eyre::ensure!(campus.ledger.my_results(&ada).await?.is_empty(), "row written");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn results_require_an_exam() -> Result<(), eyre::Report> {
    let campus = Campus::new()?;
    let essay = assignment(&campus, "Essay").await?;
    let ada = campus.login("Ada", "student").await?;

    let err = campus
        .ledger
        .submit_exam_result(&ada, essay, &json!(50), None)
        .await
        .err()
        .ok_or_else(|| eyre::eyre!("result recorded against an assignment"))?;

    eyre::ensure!(err.kind() == ErrorKind::NotFound, "got {:?}", err.kind());
    Ok(())
}
