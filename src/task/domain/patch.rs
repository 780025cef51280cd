//! Role-selected patch policy.
//!
//! Admins may change any field; students may only toggle the completion
//! flag of an assignment. Which fields apply is decided once, by
//! [`PatchPolicy::for_role`], instead of at every call site.

use super::{Priority, Task, TaskDomainError, TaskKind, TaskStatus};
use crate::identity::domain::Role;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Partial update to a task as received from a caller.
///
/// Values are raw so that parsing failures surface as domain errors.
/// `due_at` is the deadline of an assignment or the start of an exam.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskPatch {
    /// New title.
    #[serde(default)]
    pub title: Option<String>,
    /// New subject.
    #[serde(default)]
    pub subject: Option<String>,
    /// New description or location.
    #[serde(default)]
    pub details: Option<String>,
    /// New priority label.
    #[serde(default)]
    pub priority: Option<String>,
    /// New stored status label.
    #[serde(default)]
    pub status: Option<String>,
    /// New deadline or start time.
    #[serde(default)]
    pub due_at: Option<String>,
    /// New exam duration.
    #[serde(default)]
    pub duration_minutes: Option<u32>,
    /// New assignment completion flag.
    #[serde(default)]
    pub completed: Option<bool>,
}

impl TaskPatch {
    /// Creates a patch that only changes the completion flag.
    #[must_use]
    pub const fn completion(completed: bool) -> Self {
        Self {
            title: None,
            subject: None,
            details: None,
            priority: None,
            status: None,
            due_at: None,
            duration_minutes: None,
            completed: Some(completed),
        }
    }
}

/// Which patch fields a caller is allowed to apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatchPolicy {
    /// Every supplied field applies.
    Full,
    /// Only `completed` applies, and only to assignments. Other fields are
    /// ignored without error.
    CompletionOnly,
}

impl PatchPolicy {
    /// Selects the policy for a role.
    #[must_use]
    pub const fn for_role(role: Role) -> Self {
        match role {
            Role::Admin => Self::Full,
            Role::Student => Self::CompletionOnly,
        }
    }

    /// Applies `patch` to `task`.
    ///
    /// Every field is validated before any is written, so a rejected patch
    /// leaves the task untouched. Returns whether anything was applied.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError`] under [`PatchPolicy::Full`] when a field
    /// fails to parse or does not fit the task's kind.
    pub fn apply(
        self,
        task: &mut Task,
        patch: &TaskPatch,
        clock: &impl Clock,
    ) -> Result<bool, TaskDomainError> {
        match self {
            Self::Full => apply_full(task, patch, clock),
            Self::CompletionOnly => Ok(apply_completion(task, patch, clock)),
        }
    }
}

fn apply_completion(task: &mut Task, patch: &TaskPatch, clock: &impl Clock) -> bool {
    match patch.completed {
        Some(completed) if task.kind() == TaskKind::Assignment => {
            task.set_completed(completed, clock).is_ok()
        }
        _ => false,
    }
}

struct ValidatedPatch {
    priority: Option<Priority>,
    status: Option<TaskStatus>,
    due_at: Option<DateTime<Utc>>,
}

fn validate_full(task: &Task, patch: &TaskPatch) -> Result<ValidatedPatch, TaskDomainError> {
    let kind = task.kind();
    if patch.completed.is_some() && kind != TaskKind::Assignment {
        return Err(TaskDomainError::FieldNotApplicable {
            field: "completed",
            kind,
        });
    }
    if patch.duration_minutes.is_some() && kind != TaskKind::Exam {
        return Err(TaskDomainError::FieldNotApplicable {
            field: "duration_minutes",
            kind,
        });
    }
    if patch.duration_minutes == Some(0) {
        return Err(TaskDomainError::InvalidDuration(0));
    }
    if patch.title.as_deref().is_some_and(|t| t.trim().is_empty()) {
        return Err(TaskDomainError::EmptyTitle);
    }
    if patch.subject.as_deref().is_some_and(|s| s.trim().is_empty()) {
        return Err(TaskDomainError::EmptySubject);
    }

    let priority = patch
        .priority
        .as_deref()
        .map(Priority::try_from)
        .transpose()?;
    let status = patch
        .status
        .as_deref()
        .map(TaskStatus::try_from)
        .transpose()?;
    if let Some(requested) = status
        && !requested.is_storable_for(kind)
    {
        return Err(TaskDomainError::StatusNotAllowed {
            status: requested,
            kind,
        });
    }
    let due_at = patch
        .due_at
        .as_deref()
        .map(parse_schedule_time)
        .transpose()?;

    Ok(ValidatedPatch {
        priority,
        status,
        due_at,
    })
}

fn apply_full(
    task: &mut Task,
    patch: &TaskPatch,
    clock: &impl Clock,
) -> Result<bool, TaskDomainError> {
    let validated = validate_full(task, patch)?;
    let mut changed = false;

    if let Some(title) = &patch.title {
        task.rename(title)?;
        changed = true;
    }
    if let Some(subject) = &patch.subject {
        task.change_subject(subject)?;
        changed = true;
    }
    if let Some(details) = &patch.details {
        task.change_details(details.clone());
        changed = true;
    }
    if let Some(priority) = validated.priority {
        task.change_priority(priority);
        changed = true;
    }
    if let Some(at) = validated.due_at {
        task.reschedule(at);
        changed = true;
    }
    if let Some(minutes) = patch.duration_minutes {
        task.change_duration(minutes)?;
        changed = true;
    }
    // Completion derives a stored status; an explicit status overrides it.
    if let Some(completed) = patch.completed {
        task.set_completed(completed, clock)?;
        changed = true;
    }
    if let Some(status) = validated.status {
        task.store_status(status)?;
        changed = true;
    }

    if changed {
        task.touch(clock);
    }
    Ok(changed)
}

/// Parses a deadline or start time.
///
/// Accepts RFC 3339 (`2025-03-01T09:00:00Z`), a naive date-time taken as
/// UTC (`2025-03-01T09:00:00`), or a bare date taken as UTC midnight
/// (`2025-03-01`).
///
/// # Errors
///
/// Returns [`TaskDomainError::InvalidDate`] for anything else.
pub fn parse_schedule_time(raw: &str) -> Result<DateTime<Utc>, TaskDomainError> {
    let trimmed = raw.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(parsed.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S") {
        return Ok(naive.and_utc());
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
        .ok_or_else(|| TaskDomainError::InvalidDate(raw.to_owned()))
}
