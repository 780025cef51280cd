//! Then steps for academic lifecycle BDD scenarios.

use super::world::{AcademicWorld, run_async};
use lyceum::{error::ErrorKind, task::domain::TaskStatus};
use rstest_bdd_macros::then;

#[then(r#"the task status is "{status}""#)]
fn task_status_is(world: &AcademicWorld, status: String) -> Result<(), eyre::Report> {
    let expected = TaskStatus::try_from(status.as_str())
        .map_err(|err| eyre::eyre!("invalid expected status in scenario: {err}"))?;
    let student = world.student()?;
    let view = run_async(world.store.get(&student, world.current_task()?))?;

    if view.status != expected {
        return Err(eyre::eyre!(
            "expected status {expected}, found {}",
            view.status
        ));
    }
    Ok(())
}

#[then("the task has {count:usize} submissions")]
fn task_has_submissions(world: &AcademicWorld, count: usize) -> Result<(), eyre::Report> {
    let admin = world.admin()?;
    let entries = run_async(world.ledger.list_submissions(&admin, world.current_task()?))?;

    if entries.len() != count {
        return Err(eyre::eyre!(
            "expected {count} submissions, found {}",
            entries.len()
        ));
    }
    Ok(())
}

#[then(r#"the request fails as "{kind}""#)]
fn request_fails_as(world: &AcademicWorld, kind: String) -> Result<(), eyre::Report> {
    let failure = world
        .last_failure
        .ok_or_else(|| eyre::eyre!("expected a {kind} failure, but the request succeeded"))?;

    if failure.as_str() != kind {
        return Err(eyre::eyre!("expected a {kind} failure, found {failure}"));
    }
    Ok(())
}

#[then("the task no longer exists")]
fn task_no_longer_exists(world: &AcademicWorld) -> Result<(), eyre::Report> {
    let admin = world.admin()?;
    let result = run_async(world.store.get(&admin, world.current_task()?));

    match result {
        Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
        other => Err(eyre::eyre!("expected the task to be gone, got {other:?}")),
    }
}
