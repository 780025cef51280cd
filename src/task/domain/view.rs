//! Read-side projections of tasks.

use super::{Task, TaskId, TaskKind, TaskStatus, days_left, effective_status};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A task as a reader sees it at a given instant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskView {
    /// Stored record.
    pub task: Task,
    /// Status after applying the status engine.
    pub status: TaskStatus,
    /// Days until the deadline or exam start; negative once passed.
    pub days_left: i64,
}

impl TaskView {
    /// Projects `task` at `now`.
    #[must_use]
    pub fn at(task: Task, now: DateTime<Utc>) -> Self {
        let status = effective_status(&task, now);
        let days_left = days_left(task.schedule().reference_time(), now);
        Self {
            task,
            status,
            days_left,
        }
    }
}

/// Short description of a task joined onto ledger entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskSummary {
    /// Task identifier.
    pub id: TaskId,
    /// Assignment or exam.
    pub kind: TaskKind,
    /// Title.
    pub title: String,
    /// Subject.
    pub subject: String,
}

/// Deadline proximity buckets used to filter task lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DueWindow {
    /// Zero days left.
    DueToday,
    /// Two days or fewer left, including overdue.
    DueSoon,
    /// Seven days or fewer left, including overdue.
    DueThisWeek,
    /// Between eight and fourteen days left.
    DueNextWeek,
}

impl DueWindow {
    /// Returns `true` when `days_left` falls in this bucket.
    #[must_use]
    pub const fn contains(self, days_left: i64) -> bool {
        match self {
            Self::DueToday => days_left == 0,
            Self::DueSoon => days_left <= 2,
            Self::DueThisWeek => days_left <= 7,
            Self::DueNextWeek => days_left > 7 && days_left <= 14,
        }
    }
}

/// Filter over projected tasks. Unset fields match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskQuery {
    /// Restrict to one kind.
    #[serde(default)]
    pub kind: Option<TaskKind>,
    /// Restrict to an exact subject.
    #[serde(default)]
    pub subject: Option<String>,
    /// Restrict to an effective status.
    #[serde(default)]
    pub status: Option<TaskStatus>,
    /// Restrict to a deadline bucket. Results are then ordered by days left.
    #[serde(default)]
    pub due: Option<DueWindow>,
}

impl TaskQuery {
    /// Returns `true` when `view` passes every set filter.
    #[must_use]
    pub fn matches(&self, view: &TaskView) -> bool {
        self.kind.is_none_or(|kind| view.task.kind() == kind)
            && self
                .subject
                .as_deref()
                .is_none_or(|subject| view.task.subject() == subject)
            && self.status.is_none_or(|status| view.status == status)
            && self.due.is_none_or(|window| window.contains(view.days_left))
    }
}
