//! Removes ledger records when their task is deleted.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::debug;

use crate::ledger::ports::{ExamResultRepository, SubmissionRepository};
use crate::task::{
    domain::TaskId,
    ports::{DependentPurgeError, TaskDependents},
};

/// [`TaskDependents`] backed by the ledger's submission and result stores.
#[derive(Clone)]
pub struct LedgerDependents<S, E>
where
    S: SubmissionRepository,
    E: ExamResultRepository,
{
    submissions: Arc<S>,
    results: Arc<E>,
}

impl<S, E> LedgerDependents<S, E>
where
    S: SubmissionRepository,
    E: ExamResultRepository,
{
    /// Creates a purge hook over the given stores.
    #[must_use]
    pub const fn new(submissions: Arc<S>, results: Arc<E>) -> Self {
        Self {
            submissions,
            results,
        }
    }
}

#[async_trait]
impl<S, E> TaskDependents for LedgerDependents<S, E>
where
    S: SubmissionRepository,
    E: ExamResultRepository,
{
    async fn purge_task(&self, task_id: TaskId) -> Result<usize, DependentPurgeError> {
        let submissions = self
            .submissions
            .delete_for_task(task_id)
            .await
            .map_err(|err| DependentPurgeError::new(task_id, err))?;
        let results = self
            .results
            .delete_for_task(task_id)
            .await
            .map_err(|err| DependentPurgeError::new(task_id, err))?;
        debug!(task_id = %task_id, submissions, results, "purged ledger records");
        Ok(submissions + results)
    }
}
