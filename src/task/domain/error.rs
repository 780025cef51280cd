//! Error types for task domain validation and parsing.

use super::{TaskId, TaskKind, TaskStatus};
use thiserror::Error;

/// Errors returned while constructing or patching tasks.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// The title is empty after trimming.
    #[error("task title must not be empty")]
    EmptyTitle,

    /// The subject is empty after trimming.
    #[error("task subject must not be empty")]
    EmptySubject,

    /// An exam duration of zero minutes.
    #[error("exam duration must be a positive number of minutes, got {0}")]
    InvalidDuration(u32),

    /// A date string that is neither RFC 3339 nor `YYYY-MM-DD`.
    #[error("invalid date '{0}'")]
    InvalidDate(String),

    /// The priority label is unknown.
    #[error(transparent)]
    InvalidPriority(#[from] ParsePriorityError),

    /// The status label is unknown.
    #[error(transparent)]
    InvalidStatus(#[from] ParseTaskStatusError),

    /// The status exists but cannot be stored on this kind of task.
    #[error("status {status} cannot be stored on an {kind}")]
    StatusNotAllowed {
        /// Requested status.
        status: TaskStatus,
        /// Kind of the target task.
        kind: TaskKind,
    },

    /// The patch names a field the task kind does not have.
    #[error("field '{field}' does not apply to an {kind}")]
    FieldNotApplicable {
        /// Offending field.
        field: &'static str,
        /// Kind of the target task.
        kind: TaskKind,
    },

    /// A completion change was requested on an exam.
    #[error("task {0} is not an assignment")]
    NotAnAssignment(TaskId),
}

/// Error returned while parsing a task status label.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task status: {0}")]
pub struct ParseTaskStatusError(pub String);

/// Error returned while parsing a priority label.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown priority: {0}")]
pub struct ParsePriorityError(pub String);
