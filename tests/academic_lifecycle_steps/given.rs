//! Given steps for academic lifecycle BDD scenarios.

use super::world::{AcademicWorld, run_async};
use chrono::Duration;
use eyre::WrapErr;
use lyceum::{
    config::LedgerConfig,
    identity::domain::Role,
    ledger::domain::ResubmissionPolicy,
    task::services::CreateTaskRequest,
};
use mockable::Clock;
use rstest_bdd_macros::given;

#[given(r#"an admin "{admin}" and a student "{student}""#)]
fn admin_and_student(
    world: &mut AcademicWorld,
    admin: String,
    student: String,
) -> Result<(), eyre::Report> {
    world.admin = Some(world.register(&admin, Role::Admin)?);
    world.student = Some(world.register(&student, Role::Student)?);
    Ok(())
}

#[given("resubmissions are rejected")]
fn resubmissions_rejected(world: &mut AcademicWorld) {
    world.reconfigure_ledger(LedgerConfig {
        assignment_resubmission: ResubmissionPolicy::Reject,
        exam_resubmission: ResubmissionPolicy::Reject,
    });
}

#[given(r#"an assignment "{title}" in "{subject}" due in {days:i64} days"#)]
fn assignment_due_in(
    world: &mut AcademicWorld,
    title: String,
    subject: String,
    days: i64,
) -> Result<(), eyre::Report> {
    let admin = world.admin()?;
    let due_at = (world.clock.utc() + Duration::days(days)).to_rfc3339();
    let view = run_async(
        world
            .store
            .create(&admin, CreateTaskRequest::assignment(title, subject, due_at)),
    )
    .wrap_err("create assignment in scenario setup")?;
    world.current_task = Some(view.task.id());
    Ok(())
}

#[given(r#"an exam "{title}" in "{subject}" starting in {days:i64} days"#)]
fn exam_starting_in(
    world: &mut AcademicWorld,
    title: String,
    subject: String,
    days: i64,
) -> Result<(), eyre::Report> {
    let admin = world.admin()?;
    let starts_at = (world.clock.utc() + Duration::days(days)).to_rfc3339();
    let view = run_async(
        world
            .store
            .create(&admin, CreateTaskRequest::exam(title, subject, starts_at, 60)),
    )
    .wrap_err("create exam in scenario setup")?;
    world.current_task = Some(view.task.id());
    Ok(())
}

#[given(r#"the student has submitted "{content}""#)]
fn student_has_submitted(world: &mut AcademicWorld, content: String) -> Result<(), eyre::Report> {
    let student = world.student()?;
    let task_id = world.current_task()?;
    run_async(world.ledger.submit_assignment(&student, task_id, content))
        .wrap_err("submit assignment in scenario setup")?;
    Ok(())
}
