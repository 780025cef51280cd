//! Assignment submissions.

use super::SubmissionId;
use crate::identity::domain::UserId;
use crate::task::domain::TaskId;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Free-form work handed in for an assignment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Submission {
    id: SubmissionId,
    task_id: TaskId,
    user_id: UserId,
    content: String,
    created_at: DateTime<Utc>,
}

impl Submission {
    /// Records `content` handed in by `user_id` for `task_id` now.
    #[must_use]
    pub fn record(
        task_id: TaskId,
        user_id: UserId,
        content: impl Into<String>,
        clock: &impl Clock,
    ) -> Self {
        Self {
            id: SubmissionId::new(),
            task_id,
            user_id,
            content: content.into(),
            created_at: clock.utc(),
        }
    }

    /// Returns the submission identifier.
    #[must_use]
    pub const fn id(&self) -> SubmissionId {
        self.id
    }

    /// Returns the assignment this was handed in for.
    #[must_use]
    pub const fn task_id(&self) -> TaskId {
        self.task_id
    }

    /// Returns the submitting user.
    #[must_use]
    pub const fn user_id(&self) -> UserId {
        self.user_id
    }

    /// Returns the submitted text.
    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Returns when the submission was recorded.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
