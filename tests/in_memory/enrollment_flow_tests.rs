//! In-memory integration tests for course enrollment.

use super::helpers::Campus;
use lyceum::{
    enrollment::domain::{Course, CoursePatch},
    error::ErrorKind,
};
use rstest::rstest;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn students_enroll_once_and_withdraw() -> Result<(), eyre::Report> {
    let campus = Campus::new()?;
    let admin = campus.login("Grace", "admin").await?;
    let ada = campus.login("Ada", "student").await?;
    let course = campus
        .enrollments
        .create_course(&admin, "Ancient History", "Bronze age to Rome")
        .await?;

    let listed: Vec<String> = campus
        .enrollments
        .list_courses()
        .await?
        .iter()
        .map(|course| course.title().to_owned())
        .collect();
    eyre::ensure!(listed == ["Ancient History"], "got {listed:?}");

    let entry = campus.enrollments.enroll(&ada, course.id()).await?;
    let again = campus
        .enrollments
        .enroll(&ada, course.id())
        .await
        .err()
        .ok_or_else(|| eyre::eyre!("enrolled twice"))?;
    eyre::ensure!(again.kind() == ErrorKind::Conflict, "got {:?}", again.kind());

    let mine = campus.enrollments.my_enrollments(&ada).await?;
    let titles: Vec<Option<&str>> = mine
        .iter()
        .map(|row| row.course.as_ref().map(Course::title))
        .collect();
    eyre::ensure!(titles == [Some("Ancient History")], "got {titles:?}");

    campus
        .enrollments
        .withdraw(&ada, entry.enrollment.id())
        .await?;
    eyre::ensure!(
        campus.enrollments.all_enrollments(&admin).await?.is_empty(),
        "enrollment survived withdrawal"
    );
    campus.enrollments.enroll(&ada, course.id()).await?;
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn admin_view_joins_students() -> Result<(), eyre::Report> {
    let campus = Campus::new()?;
    let admin = campus.login("Grace", "admin").await?;
    let ada = campus.login("Ada", "student").await?;
    let alan = campus.login("Alan", "student").await?;
    let course = campus
        .enrollments
        .create_course(&admin, "Logic", "Propositions and proofs")
        .await?;
    campus.enrollments.enroll(&ada, course.id()).await?;
    let alans = campus.enrollments.enroll(&alan, course.id()).await?;

    let names: Vec<Option<String>> = campus
        .enrollments
        .all_enrollments(&admin)
        .await?
        .into_iter()
        .map(|row| row.user.map(|user| user.name))
        .collect();
    eyre::ensure!(
        names == [Some("Ada".to_owned()), Some("Alan".to_owned())],
        "got {names:?}"
    );

    let err = campus
        .enrollments
        .withdraw(&ada, alans.enrollment.id())
        .await
        .err()
        .ok_or_else(|| eyre::eyre!("withdrew someone else"))?;
    eyre::ensure!(err.kind() == ErrorKind::Forbidden, "got {:?}", err.kind());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn course_edits_and_deletion_reach_enrollments() -> Result<(), eyre::Report> {
    let campus = Campus::new()?;
    let admin = campus.login("Grace", "admin").await?;
    let ada = campus.login("Ada", "student").await?;
    let course = campus
        .enrollments
        .create_course(&admin, "Ancient History", "Bronze age to Rome")
        .await?;
    campus.enrollments.enroll(&ada, course.id()).await?;

    let patch = CoursePatch {
        title: Some("Classical History".to_owned()),
        description: None,
    };
    campus
        .enrollments
        .update_course(&admin, course.id(), &patch)
        .await?;
    let mine = campus.enrollments.my_enrollments(&ada).await?;
    let titles: Vec<Option<&str>> = mine
        .iter()
        .map(|row| row.course.as_ref().map(Course::title))
        .collect();
    eyre::ensure!(titles == [Some("Classical History")], "got {titles:?}");

    campus.enrollments.delete_course(&admin, course.id()).await?;
    eyre::ensure!(
        campus.enrollments.my_enrollments(&ada).await?.is_empty(),
        "enrollment outlived its course"
    );
    eyre::ensure!(
        campus.enrollments.list_courses().await?.is_empty(),
        "course still listed"
    );
    Ok(())
}
