//! In-memory repository for assignments and exams.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::task::{
    domain::{Task, TaskId},
    ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};

/// Thread-safe in-memory task repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskRepository {
    state: Arc<RwLock<HashMap<TaskId, Task>>>,
}

impl InMemoryTaskRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned(err: &impl ToString) -> TaskRepositoryError {
    TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn store(&self, task: &Task) -> TaskRepositoryResult<()> {
        let mut tasks = self.state.write().map_err(|err| poisoned(&err))?;
        if tasks.contains_key(&task.id()) {
            return Err(TaskRepositoryError::DuplicateTask(task.id()));
        }
        tasks.insert(task.id(), task.clone());
        Ok(())
    }

    async fn update(&self, task: &Task) -> TaskRepositoryResult<Task> {
        let mut tasks = self.state.write().map_err(|err| poisoned(&err))?;
        let slot = tasks
            .get_mut(&task.id())
            .ok_or(TaskRepositoryError::NotFound(task.id()))?;
        if slot.revision() != task.revision() {
            return Err(TaskRepositoryError::Stale(task.id()));
        }
        *slot = task.clone();
        slot.advance_revision();
        Ok(slot.clone())
    }

    async fn mark_completed(
        &self,
        id: TaskId,
        completed: bool,
        at: DateTime<Utc>,
    ) -> TaskRepositoryResult<Task> {
        let mut tasks = self.state.write().map_err(|err| poisoned(&err))?;
        let slot = tasks.get_mut(&id).ok_or(TaskRepositoryError::NotFound(id))?;
        slot.complete_at(completed, at).map_err(|_| TaskRepositoryError::NotAnAssignment(id))?;
        slot.advance_revision();
        Ok(slot.clone())
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        let tasks = self.state.read().map_err(|err| poisoned(&err))?;
        Ok(tasks.get(&id).cloned())
    }

    async fn list_all(&self) -> TaskRepositoryResult<Vec<Task>> {
        let tasks = self.state.read().map_err(|err| poisoned(&err))?;
        let mut all: Vec<Task> = tasks.values().cloned().collect();
        all.sort_by_key(|task| (task.created_at(), task.id()));
        Ok(all)
    }

    async fn remove(&self, id: TaskId) -> TaskRepositoryResult<Task> {
        let mut tasks = self.state.write().map_err(|err| poisoned(&err))?;
        tasks.remove(&id).ok_or(TaskRepositoryError::NotFound(id))
    }
}
