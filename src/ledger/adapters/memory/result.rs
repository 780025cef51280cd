//! In-memory exam result store.

use async_trait::async_trait;
use std::sync::{Arc, RwLock};

use crate::ledger::{
    domain::{ExamResult, ResultFilter},
    ports::{ExamResultRepository, LedgerRepositoryError, LedgerRepositoryResult},
};
use crate::task::domain::TaskId;

/// Thread-safe in-memory exam result repository. Keeps append order.
#[derive(Debug, Clone, Default)]
pub struct InMemoryExamResultRepository {
    state: Arc<RwLock<Vec<ExamResult>>>,
}

impl InMemoryExamResultRepository {
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
impl ExamResultRepository for InMemoryExamResultRepository {
    async fn append(&self, result: &ExamResult) -> LedgerRepositoryResult<()> {
        let mut rows = self.state.write().map_err(|err| poisoned(&err))?;
        if rows.iter().any(|row| row.id() == result.id()) {
            return Err(LedgerRepositoryError::DuplicateResult(result.id()));
        }
        rows.push(result.clone());
        Ok(())
    }

    async fn list(&self, filter: &ResultFilter) -> LedgerRepositoryResult<Vec<ExamResult>> {
        let rows = self.state.read().map_err(|err| poisoned(&err))?;
        Ok(rows.iter().filter(|row| filter.matches(row)).cloned().collect())
    }

    async fn delete_for_task(&self, exam_id: TaskId) -> LedgerRepositoryResult<usize> {
        let mut rows = self.state.write().map_err(|err| poisoned(&err))?;
        let before = rows.len();
        rows.retain(|row| row.exam_id() != exam_id);
        Ok(before - rows.len())
    }
}
