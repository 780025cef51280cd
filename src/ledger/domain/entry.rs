//! Ledger records joined with the task and user they reference.

use super::{ExamResult, Submission};
use crate::identity::domain::{UserId, UserSummary};
use crate::task::domain::{TaskId, TaskSummary};
use serde::{Deserialize, Serialize};

/// Confirmation returned after handing in an assignment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionReceipt {
    /// Stored submission.
    pub submission: Submission,
    /// Assignment it was handed in for.
    pub task: TaskSummary,
    /// Submitting user, when present in the directory.
    pub user: Option<UserSummary>,
}

/// A submission with its author.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionEntry {
    /// Stored submission.
    pub submission: Submission,
    /// Submitting user, when present in the directory.
    pub user: Option<UserSummary>,
}

/// An exam result with its exam.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExamResultEntry {
    /// Stored result.
    pub result: ExamResult,
    /// Exam the result belongs to. `None` if the exam vanished after the
    /// result was read.
    pub exam: Option<TaskSummary>,
}

/// Filter for listing exam results. Unset fields match everything.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultFilter {
    /// Restrict to one exam.
    #[serde(default)]
    pub exam_id: Option<TaskId>,
    /// Restrict to one student.
    #[serde(default)]
    pub user_id: Option<UserId>,
}

impl ResultFilter {
    /// Matches results of one student.
    #[must_use]
    pub const fn for_user(user_id: UserId) -> Self {
        Self {
            exam_id: None,
            user_id: Some(user_id),
        }
    }

    /// Returns `true` when `result` passes every set filter.
    #[must_use]
    pub fn matches(&self, result: &ExamResult) -> bool {
        self.exam_id.is_none_or(|id| result.exam_id() == id)
            && self.user_id.is_none_or(|id| result.user_id() == id)
    }
}
