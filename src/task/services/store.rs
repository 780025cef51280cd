//! Service layer for creating, reading, patching, and deleting tasks.

use crate::authorization::{AccessDenied, require_admin};
use crate::error::ErrorKind;
use crate::identity::domain::AuthContext;
use crate::task::{
    domain::{
        NewTask, PatchPolicy, Priority, Task, TaskDomainError, TaskId, TaskPatch, TaskQuery,
        TaskView, parse_schedule_time,
    },
    ports::{DependentPurgeError, TaskDependents, TaskRepository, TaskRepositoryError},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

#[derive(Debug, Clone, PartialEq, Eq)]
enum RequestedSchedule {
    Assignment {
        due_at: String,
    },
    Exam {
        scheduled_at: String,
        duration_minutes: u32,
    },
}

/// Request payload for creating a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTaskRequest {
    title: String,
    subject: String,
    details: Option<String>,
    priority: Option<String>,
    schedule: RequestedSchedule,
}

impl CreateTaskRequest {
    /// Creates an assignment request. `due_at` is parsed by
    /// [`parse_schedule_time`].
    #[must_use]
    pub fn assignment(
        title: impl Into<String>,
        subject: impl Into<String>,
        due_at: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            subject: subject.into(),
            details: None,
            priority: None,
            schedule: RequestedSchedule::Assignment {
                due_at: due_at.into(),
            },
        }
    }

    /// Creates an exam request. `scheduled_at` is parsed by
    /// [`parse_schedule_time`].
    #[must_use]
    pub fn exam(
        title: impl Into<String>,
        subject: impl Into<String>,
        scheduled_at: impl Into<String>,
        duration_minutes: u32,
    ) -> Self {
        Self {
            title: title.into(),
            subject: subject.into(),
            details: None,
            priority: None,
            schedule: RequestedSchedule::Exam {
                scheduled_at: scheduled_at.into(),
                duration_minutes,
            },
        }
    }

    /// Sets the description (assignments) or location (exams).
    #[must_use]
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Sets the priority label.
    #[must_use]
    pub fn with_priority(mut self, priority: impl Into<String>) -> Self {
        self.priority = Some(priority.into());
        self
    }

    fn into_new_task(self) -> Result<NewTask, TaskDomainError> {
        let Self {
            title,
            subject,
            details,
            priority,
            schedule,
        } = self;

        let mut new_task = match schedule {
            RequestedSchedule::Assignment { due_at } => {
                NewTask::assignment(title, subject, parse_schedule_time(&due_at)?)
            }
            RequestedSchedule::Exam {
                scheduled_at,
                duration_minutes,
            } => NewTask::exam(
                title,
                subject,
                parse_schedule_time(&scheduled_at)?,
                duration_minutes,
            ),
        };
        if let Some(text) = details {
            new_task = new_task.with_details(text);
        }
        if let Some(label) = priority {
            new_task = new_task.with_priority(Priority::try_from(label.as_str())?);
        }
        Ok(new_task)
    }
}

/// Service-level errors for task store operations.
#[derive(Debug, Error)]
pub enum TaskStoreError {
    /// A guard rejected the caller.
    #[error(transparent)]
    Access(#[from] AccessDenied),
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),
    /// The task does not exist.
    #[error("task not found: {0}")]
    NotFound(TaskId),
    /// Dependent records could not be removed; the task was kept.
    #[error(transparent)]
    Cascade(#[from] DependentPurgeError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] TaskRepositoryError),
}

impl TaskStoreError {
    /// Classifies the failure.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Access(_) => ErrorKind::Forbidden,
            Self::Domain(_) | Self::Repository(TaskRepositoryError::NotAnAssignment(_)) => {
                ErrorKind::BadRequest
            }
            Self::NotFound(_) | Self::Repository(TaskRepositoryError::NotFound(_)) => {
                ErrorKind::NotFound
            }
            Self::Repository(
                TaskRepositoryError::DuplicateTask(_) | TaskRepositoryError::Stale(_),
            ) => ErrorKind::Conflict,
            Self::Cascade(_) | Self::Repository(TaskRepositoryError::Persistence(_)) => {
                ErrorKind::Internal
            }
        }
    }
}

/// Result type for task store service operations.
pub type TaskStoreResult<T> = Result<T, TaskStoreError>;

/// Task store orchestration service.
#[derive(Clone)]
pub struct TaskStoreService<R, D, C>
where
    R: TaskRepository,
    D: TaskDependents,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    dependents: Arc<D>,
    clock: Arc<C>,
}

impl<R, D, C> TaskStoreService<R, D, C>
where
    R: TaskRepository,
    D: TaskDependents,
    C: Clock + Send + Sync,
{
    /// Creates a new task store service.
    #[must_use]
    pub const fn new(repository: Arc<R>, dependents: Arc<D>, clock: Arc<C>) -> Self {
        Self {
            repository,
            dependents,
            clock,
        }
    }

    /// Creates a task owned by the calling admin.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::Access`] for non-admins (no row is
    /// written), [`TaskStoreError::Domain`] for invalid input, and
    /// [`TaskStoreError::Repository`] when persistence fails.
    pub async fn create(
        &self,
        ctx: &AuthContext,
        request: CreateTaskRequest,
    ) -> TaskStoreResult<TaskView> {
        require_admin(ctx)?;
        let task = Task::create(request.into_new_task()?, ctx.user_id(), &*self.clock)?;
        self.repository.store(&task).await?;
        info!(task_id = %task.id(), kind = %task.kind(), owner = %ctx.user_id(), "created task");
        Ok(self.project(task))
    }

    /// Returns a task with its effective status.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::NotFound`] when the task does not exist.
    pub async fn get(&self, ctx: &AuthContext, id: TaskId) -> TaskStoreResult<TaskView> {
        debug!(task_id = %id, user_id = %ctx.user_id(), "reading task");
        let task = self.find_or_error(id).await?;
        Ok(self.project(task))
    }

    /// Returns every task with its effective status. All authenticated
    /// callers see all tasks.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::Repository`] when persistence lookup fails.
    pub async fn list_all(&self, ctx: &AuthContext) -> TaskStoreResult<Vec<TaskView>> {
        self.list(ctx, &TaskQuery::default()).await
    }

    /// Returns tasks passing `query`, in creation order, or by days left when
    /// the query sets a due window.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::Repository`] when persistence lookup fails.
    pub async fn list(
        &self,
        ctx: &AuthContext,
        query: &TaskQuery,
    ) -> TaskStoreResult<Vec<TaskView>> {
        debug!(user_id = %ctx.user_id(), ?query, "listing tasks");
        let now = self.clock.utc();
        let mut views: Vec<TaskView> = self
            .repository
            .list_all()
            .await?
            .into_iter()
            .map(|task| TaskView::at(task, now))
            .filter(|view| query.matches(view))
            .collect();
        if query.due.is_some() {
            views.sort_by_key(|view| view.days_left);
        }
        Ok(views)
    }

    /// Applies a patch under the caller's role policy.
    ///
    /// Admins may change any field; students only the completion flag of an
    /// assignment, with other fields ignored. The write only lands if the
    /// task is unchanged since it was read.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::NotFound`] when the task does not exist,
    /// [`TaskStoreError::Domain`] when an admin patch is invalid, and
    /// [`TaskRepositoryError::Stale`] when a concurrent write got there
    /// first.
    pub async fn update(
        &self,
        ctx: &AuthContext,
        id: TaskId,
        patch: &TaskPatch,
    ) -> TaskStoreResult<TaskView> {
        let mut task = self.find_or_error(id).await?;
        let policy = PatchPolicy::for_role(ctx.role());
        if !policy.apply(&mut task, patch, &*self.clock)? {
            return Ok(self.project(task));
        }
        let stored = self.repository.update(&task).await?;
        info!(task_id = %id, user_id = %ctx.user_id(), ?policy, "updated task");
        Ok(self.project(stored))
    }

    /// Deletes a task after removing every submission and result that
    /// references it, and returns the deleted record.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::Access`] for non-admins,
    /// [`TaskStoreError::NotFound`] when the task does not exist, and
    /// [`TaskStoreError::Cascade`] when dependents could not be removed, in
    /// which case the task is kept.
    pub async fn delete(&self, ctx: &AuthContext, id: TaskId) -> TaskStoreResult<Task> {
        require_admin(ctx)?;
        self.find_or_error(id).await?;
        let purged = self.dependents.purge_task(id).await?;
        let removed = self.repository.remove(id).await?;
        info!(task_id = %id, purged, "deleted task");
        Ok(removed)
    }

    fn project(&self, task: Task) -> TaskView {
        TaskView::at(task, self.clock.utc())
    }

    async fn find_or_error(&self, id: TaskId) -> TaskStoreResult<Task> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(TaskStoreError::NotFound(id))
    }
}
