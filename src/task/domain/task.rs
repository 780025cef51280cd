//! Task aggregate root and related task lifecycle types.

use super::{ParsePriorityError, TaskDomainError, TaskId, TaskStatus, TaskSummary};
use crate::identity::domain::UserId;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Variant discriminant of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskKind {
    /// Work due at a point in time.
    Assignment,
    /// A scheduled sitting with a duration.
    Exam,
}

impl TaskKind {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Assignment => "assignment",
            Self::Exam => "exam",
        }
    }
}

impl fmt::Display for TaskKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Task priority.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    /// Urgent.
    High,
    /// Normal.
    #[default]
    Medium,
    /// Can wait.
    Low,
}

impl Priority {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }
}

impl TryFrom<&str> for Priority {
    type Error = ParsePriorityError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "high" => Ok(Self::High),
            "medium" => Ok(Self::Medium),
            "low" => Ok(Self::Low),
            _ => Err(ParsePriorityError(value.to_owned())),
        }
    }
}

/// Kind-specific timing data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TaskSchedule {
    /// Assignment timing and completion flag.
    Assignment {
        /// Deadline.
        due_at: DateTime<Utc>,
        /// Whether a student has completed the assignment.
        completed: bool,
    },
    /// Exam timing.
    Exam {
        /// Start of the sitting.
        scheduled_at: DateTime<Utc>,
        /// Length of the sitting.
        duration_minutes: u32,
    },
}

impl TaskSchedule {
    /// Returns the variant discriminant.
    #[must_use]
    pub const fn kind(&self) -> TaskKind {
        match self {
            Self::Assignment { .. } => TaskKind::Assignment,
            Self::Exam { .. } => TaskKind::Exam,
        }
    }

    /// Returns the due time of an assignment or the start of an exam.
    #[must_use]
    pub const fn reference_time(&self) -> DateTime<Utc> {
        match self {
            Self::Assignment { due_at, .. } => *due_at,
            Self::Exam { scheduled_at, .. } => *scheduled_at,
        }
    }
}

/// Validated input for creating a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    title: String,
    subject: String,
    details: String,
    priority: Priority,
    schedule: TaskSchedule,
}

impl NewTask {
    /// Describes an assignment due at `due_at`.
    #[must_use]
    pub fn assignment(
        title: impl Into<String>,
        subject: impl Into<String>,
        due_at: DateTime<Utc>,
    ) -> Self {
        Self::with_schedule(
            title.into(),
            subject.into(),
            TaskSchedule::Assignment {
                due_at,
                completed: false,
            },
        )
    }

    /// Describes an exam starting at `scheduled_at`.
    #[must_use]
    pub fn exam(
        title: impl Into<String>,
        subject: impl Into<String>,
        scheduled_at: DateTime<Utc>,
        duration_minutes: u32,
    ) -> Self {
        Self::with_schedule(
            title.into(),
            subject.into(),
            TaskSchedule::Exam {
                scheduled_at,
                duration_minutes,
            },
        )
    }

    fn with_schedule(title: String, subject: String, schedule: TaskSchedule) -> Self {
        Self {
            title,
            subject,
            details: String::new(),
            priority: Priority::default(),
            schedule,
        }
    }

    /// Sets the description (assignments) or location (exams).
    #[must_use]
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = details.into();
        self
    }

    /// Sets the priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }
}

/// Task aggregate root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    title: String,
    subject: String,
    details: String,
    priority: Priority,
    owner: UserId,
    status: TaskStatus,
    schedule: TaskSchedule,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    #[serde(default)]
    revision: u64,
}

impl Task {
    /// Creates a task owned by `owner` in its kind's initial status.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyTitle`],
    /// [`TaskDomainError::EmptySubject`], or
    /// [`TaskDomainError::InvalidDuration`] when validation fails.
    pub fn create(new: NewTask, owner: UserId, clock: &impl Clock) -> Result<Self, TaskDomainError> {
        let NewTask {
            title,
            subject,
            details,
            priority,
            schedule,
        } = new;
        let timestamp = clock.utc();

        Ok(Self {
            id: TaskId::new(),
            title: normalize_title(&title)?,
            subject: normalize_subject(&subject)?,
            details,
            priority,
            owner,
            status: TaskStatus::initial_for(schedule.kind()),
            schedule: validate_schedule(schedule)?,
            created_at: timestamp,
            updated_at: timestamp,
            revision: 0,
        })
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the variant discriminant.
    #[must_use]
    pub const fn kind(&self) -> TaskKind {
        self.schedule.kind()
    }

    /// Returns the title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the subject.
    #[must_use]
    pub fn subject(&self) -> &str {
        &self.subject
    }

    /// Returns the description (assignments) or location (exams).
    #[must_use]
    pub fn details(&self) -> &str {
        &self.details
    }

    /// Returns the priority.
    #[must_use]
    pub const fn priority(&self) -> Priority {
        self.priority
    }

    /// Returns the admin who created the task.
    #[must_use]
    pub const fn owner(&self) -> UserId {
        self.owner
    }

    /// Returns the last explicitly stored status.
    ///
    /// This value is advisory for assignments; use
    /// [`super::effective_status`] for anything shown to a reader.
    #[must_use]
    pub const fn stored_status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the kind-specific timing data.
    #[must_use]
    pub const fn schedule(&self) -> &TaskSchedule {
        &self.schedule
    }

    /// Returns `true` for an assignment a student has completed.
    #[must_use]
    pub const fn is_completed(&self) -> bool {
        matches!(
            self.schedule,
            TaskSchedule::Assignment {
                completed: true,
                ..
            }
        )
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest modification timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Returns the store revision this copy was read at. Every successful
    /// write bumps it, so a stale copy can be told apart from the stored row.
    #[must_use]
    pub const fn revision(&self) -> u64 {
        self.revision
    }

    pub(crate) const fn advance_revision(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }

    /// Returns the summary joined onto ledger entries.
    #[must_use]
    pub fn summary(&self) -> TaskSummary {
        TaskSummary {
            id: self.id,
            kind: self.kind(),
            title: self.title.clone(),
            subject: self.subject.clone(),
        }
    }

    /// Sets the completion flag of an assignment and derives its stored
    /// status: `Completed` when set, `Pending` when cleared.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::NotAnAssignment`] for exams.
    pub fn set_completed(
        &mut self,
        completed: bool,
        clock: &impl Clock,
    ) -> Result<(), TaskDomainError> {
        self.complete_at(completed, clock.utc())
    }

    /// Same as [`Task::set_completed`] with an explicit modification time.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::NotAnAssignment`] for exams.
    pub fn complete_at(&mut self, completed: bool, at: DateTime<Utc>) -> Result<(), TaskDomainError> {
        match &mut self.schedule {
            TaskSchedule::Assignment { completed: flag, .. } => *flag = completed,
            TaskSchedule::Exam { .. } => return Err(TaskDomainError::NotAnAssignment(self.id)),
        }
        self.status = if completed {
            TaskStatus::Completed
        } else {
            TaskStatus::Pending
        };
        self.updated_at = at;
        Ok(())
    }

    pub(super) fn rename(&mut self, title: &str) -> Result<(), TaskDomainError> {
        self.title = normalize_title(title)?;
        Ok(())
    }

    pub(super) fn change_subject(&mut self, subject: &str) -> Result<(), TaskDomainError> {
        self.subject = normalize_subject(subject)?;
        Ok(())
    }

    pub(super) fn change_details(&mut self, details: String) {
        self.details = details;
    }

    pub(super) const fn change_priority(&mut self, priority: Priority) {
        self.priority = priority;
    }

    pub(super) fn store_status(&mut self, status: TaskStatus) -> Result<(), TaskDomainError> {
        let kind = self.kind();
        if !status.is_storable_for(kind) {
            return Err(TaskDomainError::StatusNotAllowed { status, kind });
        }
        self.status = status;
        Ok(())
    }

    pub(super) const fn reschedule(&mut self, at: DateTime<Utc>) {
        match &mut self.schedule {
            TaskSchedule::Assignment { due_at, .. } => *due_at = at,
            TaskSchedule::Exam { scheduled_at, .. } => *scheduled_at = at,
        }
    }

    pub(super) fn change_duration(&mut self, minutes: u32) -> Result<(), TaskDomainError> {
        if minutes == 0 {
            return Err(TaskDomainError::InvalidDuration(minutes));
        }
        match &mut self.schedule {
            TaskSchedule::Exam {
                duration_minutes, ..
            } => {
                *duration_minutes = minutes;
                Ok(())
            }
            TaskSchedule::Assignment { .. } => Err(TaskDomainError::FieldNotApplicable {
                field: "duration_minutes",
                kind: TaskKind::Assignment,
            }),
        }
    }

    /// Updates the `updated_at` timestamp to the current clock time.
    pub(super) fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = clock.utc();
    }
}

fn normalize_title(title: &str) -> Result<String, TaskDomainError> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Err(TaskDomainError::EmptyTitle);
    }
    Ok(trimmed.to_owned())
}

fn normalize_subject(subject: &str) -> Result<String, TaskDomainError> {
    let trimmed = subject.trim();
    if trimmed.is_empty() {
        return Err(TaskDomainError::EmptySubject);
    }
    Ok(trimmed.to_owned())
}

const fn validate_schedule(schedule: TaskSchedule) -> Result<TaskSchedule, TaskDomainError> {
    if let TaskSchedule::Exam {
        duration_minutes: 0,
        ..
    } = schedule
    {
        return Err(TaskDomainError::InvalidDuration(0));
    }
    Ok(schedule)
}
