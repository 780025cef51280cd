//! Repository ports for submissions and exam results.

use crate::identity::domain::UserId;
use crate::ledger::domain::{ExamResult, ExamResultId, ResultFilter, Submission, SubmissionId};
use crate::task::domain::TaskId;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for ledger repository operations.
pub type LedgerRepositoryResult<T> = Result<T, LedgerRepositoryError>;

/// Submission persistence contract.
#[async_trait]
pub trait SubmissionRepository: Send + Sync {
    /// Appends a submission.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerRepositoryError::DuplicateSubmission`] when the
    /// identifier already exists.
    async fn append(&self, submission: &Submission) -> LedgerRepositoryResult<()>;

    /// Returns submissions for `task_id` in the order they were appended.
    async fn list_for_task(&self, task_id: TaskId) -> LedgerRepositoryResult<Vec<Submission>>;

    /// Returns submissions by `user_id` for `task_id` in the order they were
    /// appended.
    async fn list_for_task_and_user(
        &self,
        task_id: TaskId,
        user_id: UserId,
    ) -> LedgerRepositoryResult<Vec<Submission>>;

    /// Deletes every submission for `task_id` and returns how many went.
    async fn delete_for_task(&self, task_id: TaskId) -> LedgerRepositoryResult<usize>;
}

/// Exam result persistence contract.
#[async_trait]
pub trait ExamResultRepository: Send + Sync {
    /// Appends a result.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerRepositoryError::DuplicateResult`] when the identifier
    /// already exists.
    async fn append(&self, result: &ExamResult) -> LedgerRepositoryResult<()>;

    /// Returns results passing `filter` in the order they were appended.
    async fn list(&self, filter: &ResultFilter) -> LedgerRepositoryResult<Vec<ExamResult>>;

    /// Deletes every result for `exam_id` and returns how many went.
    async fn delete_for_task(&self, exam_id: TaskId) -> LedgerRepositoryResult<usize>;
}

/// Errors returned by ledger repository implementations.
#[derive(Debug, Clone, Error)]
pub enum LedgerRepositoryError {
    /// A submission with the same identifier already exists.
    #[error("duplicate submission identifier: {0}")]
    DuplicateSubmission(SubmissionId),

    /// A result with the same identifier already exists.
    #[error("duplicate exam result identifier: {0}")]
    DuplicateResult(ExamResultId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl LedgerRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
