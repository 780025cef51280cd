//! In-memory submission store.

use async_trait::async_trait;
use std::sync::{Arc, RwLock};

use crate::identity::domain::UserId;
use crate::ledger::{
    domain::Submission,
    ports::{LedgerRepositoryError, LedgerRepositoryResult, SubmissionRepository},
};
use crate::task::domain::TaskId;

/// Thread-safe in-memory submission repository. Keeps append order.
#[derive(Debug, Clone, Default)]
pub struct InMemorySubmissionRepository {
    state: Arc<RwLock<Vec<Submission>>>,
}

impl InMemorySubmissionRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned(err: &impl ToString) -> LedgerRepositoryError {
    LedgerRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl SubmissionRepository for InMemorySubmissionRepository {
    async fn append(&self, submission: &Submission) -> LedgerRepositoryResult<()> {
        let mut rows = self.state.write().map_err(|err| poisoned(&err))?;
        if rows.iter().any(|row| row.id() == submission.id()) {
            return Err(LedgerRepositoryError::DuplicateSubmission(submission.id()));
        }
        rows.push(submission.clone());
        Ok(())
    }

    async fn list_for_task(&self, task_id: TaskId) -> LedgerRepositoryResult<Vec<Submission>> {
        let rows = self.state.read().map_err(|err| poisoned(&err))?;
        Ok(rows
            .iter()
            .filter(|row| row.task_id() == task_id)
            .cloned()
            .collect())
    }

    async fn list_for_task_and_user(
        &self,
        task_id: TaskId,
        user_id: UserId,
    ) -> LedgerRepositoryResult<Vec<Submission>> {
        let rows = self.state.read().map_err(|err| poisoned(&err))?;
        Ok(rows
            .iter()
            .filter(|row| row.task_id() == task_id && row.user_id() == user_id)
            .cloned()
            .collect())
    }

    async fn delete_for_task(&self, task_id: TaskId) -> LedgerRepositoryResult<usize> {
        let mut rows = self.state.write().map_err(|err| poisoned(&err))?;
        let before = rows.len();
        rows.retain(|row| row.task_id() != task_id);
        Ok(before - rows.len())
    }
}
