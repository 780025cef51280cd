//! Port for records owned elsewhere that reference a task.

use crate::task::domain::TaskId;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Removes records that depend on a task before the task itself is removed.
#[async_trait]
pub trait TaskDependents: Send + Sync {
    /// Deletes every record referencing `task_id` and returns how many were
    /// removed. Succeeds with zero when there are none.
    ///
    /// # Errors
    ///
    /// Returns [`DependentPurgeError`] when any dependent store fails. The
    /// task must then be kept.
    async fn purge_task(&self, task_id: TaskId) -> Result<usize, DependentPurgeError>;
}

/// Failure to remove records that depend on a task.
#[derive(Debug, Clone, Error)]
#[error("failed to purge records depending on task {task_id}: {cause}")]
pub struct DependentPurgeError {
    /// Task whose dependents could not be removed.
    pub task_id: TaskId,
    /// Underlying store failure.
    pub cause: Arc<dyn std::error::Error + Send + Sync>,
}

impl DependentPurgeError {
    /// Wraps a dependent store failure.
    pub fn new(task_id: TaskId, err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self {
            task_id,
            cause: Arc::new(err),
        }
    }
}
