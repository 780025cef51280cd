//! Task status values and the status engine.
//!
//! [`effective_status`] and [`days_left`] are pure functions of a task and
//! an instant. Readers never see a stored status for an assignment without
//! it passing through [`effective_status`] first.

use super::{ParseTaskStatusError, Task, TaskKind, TaskSchedule};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

const MILLIS_PER_DAY: i64 = 86_400_000;

/// Task status, stored or effective.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Assignment not yet completed and not past due.
    Pending,
    /// Exam not yet sat.
    Upcoming,
    /// Work completed or exam sat.
    Completed,
    /// Withdrawn by an admin.
    Cancelled,
    /// Assignment past due without completion. Never stored.
    Overdue,
}

impl TaskStatus {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Upcoming => "upcoming",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
            Self::Overdue => "overdue",
        }
    }

    /// Returns the status a newly created task of `kind` starts in.
    #[must_use]
    pub const fn initial_for(kind: TaskKind) -> Self {
        match kind {
            TaskKind::Assignment => Self::Pending,
            TaskKind::Exam => Self::Upcoming,
        }
    }

    /// Returns `true` when the status may be persisted on a task of `kind`.
    #[must_use]
    pub const fn is_storable_for(self, kind: TaskKind) -> bool {
        match (self, kind) {
            (Self::Completed | Self::Cancelled, _)
            | (Self::Pending, TaskKind::Assignment)
            | (Self::Upcoming, TaskKind::Exam) => true,
            (Self::Pending, TaskKind::Exam)
            | (Self::Upcoming, TaskKind::Assignment)
            | (Self::Overdue, _) => false,
        }
    }
}

impl TryFrom<&str> for TaskStatus {
    type Error = ParseTaskStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "pending" => Ok(Self::Pending),
            "upcoming" => Ok(Self::Upcoming),
            "completed" => Ok(Self::Completed),
            "cancelled" | "canceled" => Ok(Self::Cancelled),
            "overdue" => Ok(Self::Overdue),
            _ => Err(ParseTaskStatusError(value.to_owned())),
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Computes the status a reader should see at `now`.
///
/// Assignments: completed wins, then a passed deadline yields
/// [`TaskStatus::Overdue`], otherwise the stored status. Exams report their
/// stored status unchanged.
#[must_use]
pub fn effective_status(task: &Task, now: DateTime<Utc>) -> TaskStatus {
    match *task.schedule() {
        TaskSchedule::Assignment {
            completed: true, ..
        } => TaskStatus::Completed,
        TaskSchedule::Assignment { due_at, .. } if now > due_at => TaskStatus::Overdue,
        TaskSchedule::Assignment { .. } | TaskSchedule::Exam { .. } => task.stored_status(),
    }
}

/// Whole days from `now` until `due`, rounded up. Negative once `due` has
/// passed by more than a day.
///
/// `days_left(t, t) == 0` and the result never increases as `now` advances.
#[must_use]
pub fn days_left(due: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    let remaining = (due - now).num_milliseconds();
    remaining
        .saturating_neg()
        .div_euclid(MILLIS_PER_DAY)
        .saturating_neg()
}
