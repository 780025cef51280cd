//! Service layer for handing in assignments and recording exam results.

use std::cmp::Reverse;
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::sync::Arc;

use crate::authorization::{AccessDenied, require_admin, require_owner_or_admin, require_student};
use crate::config::LedgerConfig;
use crate::error::ErrorKind;
use crate::identity::{
    domain::{AuthContext, UserId, UserSummary},
    ports::{UserRepository, UserRepositoryError},
};
use crate::ledger::{
    domain::{
        ExamResult, ExamResultEntry, LedgerDomainError, ResultFilter, Score, Submission,
        SubmissionEntry, SubmissionReceipt,
    },
    ports::{ExamResultRepository, LedgerRepositoryError, SubmissionRepository},
};
use crate::task::{
    domain::{Task, TaskId, TaskKind, TaskSummary},
    ports::{TaskRepository, TaskRepositoryError},
};
use mockable::Clock;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, info};

/// Service-level errors for ledger operations.
#[derive(Debug, Error)]
pub enum LedgerServiceError {
    /// A guard rejected the caller.
    #[error(transparent)]
    Access(#[from] AccessDenied),
    /// Input validation failed.
    #[error(transparent)]
    Domain(#[from] LedgerDomainError),
    /// The referenced task is absent or of the wrong kind.
    #[error("no {kind} with id {task_id}")]
    TaskNotFound {
        /// Requested task.
        task_id: TaskId,
        /// Kind the operation needs.
        kind: TaskKind,
    },
    /// The resubmission policy refused a second entry.
    #[error("user {user_id} has already handed in task {task_id}")]
    AlreadySubmitted {
        /// Task handed in.
        task_id: TaskId,
        /// Submitting user.
        user_id: UserId,
    },
    /// Task repository operation failed.
    #[error(transparent)]
    Tasks(#[from] TaskRepositoryError),
    /// User directory lookup failed.
    #[error(transparent)]
    Users(#[from] UserRepositoryError),
    /// Ledger repository operation failed.
    #[error(transparent)]
    Ledger(#[from] LedgerRepositoryError),
}

impl LedgerServiceError {
    /// Classifies the failure.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Access(_) => ErrorKind::Forbidden,
            Self::Domain(_) | Self::Tasks(TaskRepositoryError::NotAnAssignment(_)) => {
                ErrorKind::BadRequest
            }
            Self::TaskNotFound { .. } | Self::Tasks(TaskRepositoryError::NotFound(_)) => {
                ErrorKind::NotFound
            }
            Self::AlreadySubmitted { .. }
            | Self::Tasks(TaskRepositoryError::DuplicateTask(_) | TaskRepositoryError::Stale(_))
            | Self::Ledger(
                LedgerRepositoryError::DuplicateSubmission(_)
                | LedgerRepositoryError::DuplicateResult(_),
            ) => ErrorKind::Conflict,
            Self::Tasks(TaskRepositoryError::Persistence(_))
            | Self::Users(_)
            | Self::Ledger(LedgerRepositoryError::Persistence(_)) => ErrorKind::Internal,
        }
    }
}

/// Result type for ledger service operations.
pub type LedgerServiceResult<T> = Result<T, LedgerServiceError>;

/// Submission ledger orchestration service.
#[derive(Clone)]
pub struct SubmissionLedgerService<T, U, S, E, C>
where
    T: TaskRepository,
    U: UserRepository,
    S: SubmissionRepository,
    E: ExamResultRepository,
    C: Clock + Send + Sync,
{
    tasks: Arc<T>,
    users: Arc<U>,
    submissions: Arc<S>,
    results: Arc<E>,
    clock: Arc<C>,
    config: LedgerConfig,
}

impl<T, U, S, E, C> SubmissionLedgerService<T, U, S, E, C>
where
    T: TaskRepository,
    U: UserRepository,
    S: SubmissionRepository,
    E: ExamResultRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new ledger service.
    #[must_use]
    pub const fn new(
        tasks: Arc<T>,
        users: Arc<U>,
        submissions: Arc<S>,
        results: Arc<E>,
        clock: Arc<C>,
        config: LedgerConfig,
    ) -> Self {
        Self {
            tasks,
            users,
            submissions,
            results,
            clock,
            config,
        }
    }

    /// Hands in `content` for an assignment and marks it completed.
    ///
    /// The submission is written before the assignment is marked. Marking
    /// touches only the completion flag and stored status, so edits made to
    /// the assignment meanwhile are kept. If the assignment is deleted in
    /// between, the submissions left behind for it are removed and the call
    /// fails with [`LedgerServiceError::TaskNotFound`].
    ///
    /// # Errors
    ///
    /// Returns [`LedgerServiceError::Access`] for admins,
    /// [`LedgerServiceError::TaskNotFound`] when no such assignment exists,
    /// and [`LedgerServiceError::AlreadySubmitted`] when the policy rejects
    /// a second hand-in.
    pub async fn submit_assignment(
        &self,
        ctx: &AuthContext,
        task_id: TaskId,
        content: impl Into<String> + Send,
    ) -> LedgerServiceResult<SubmissionReceipt> {
        require_student(ctx)?;
        self.find_task(task_id, TaskKind::Assignment).await?;
        let previous = self
            .submissions
            .list_for_task_and_user(task_id, ctx.user_id())
            .await?;
        ensure_permitted(
            self.config.assignment_resubmission.permits(!previous.is_empty()),
            task_id,
            ctx.user_id(),
        )?;

        let submission = Submission::record(task_id, ctx.user_id(), content, &*self.clock);
        self.submissions.append(&submission).await?;

        let task = match self
            .tasks
            .mark_completed(task_id, true, self.clock.utc())
            .await
        {
            Ok(task) => task,
            Err(TaskRepositoryError::NotFound(_)) => {
                self.submissions.delete_for_task(task_id).await?;
                return Err(LedgerServiceError::TaskNotFound {
                    task_id,
                    kind: TaskKind::Assignment,
                });
            }
            Err(err) => return Err(err.into()),
        };

        info!(
            submission_id = %submission.id(),
            task_id = %task_id,
            user_id = %ctx.user_id(),
            "recorded assignment submission"
        );
        let user = self.user_summary(ctx.user_id()).await?;
        Ok(SubmissionReceipt {
            submission,
            task: task.summary(),
            user,
        })
    }

    /// Returns every submission for a task with its author, oldest first.
    ///
    /// Open to any authenticated caller. A task with no submissions, or one
    /// that no longer exists, yields an empty list.
    ///
    /// # Errors
    ///
    /// Returns a repository error when a lookup fails.
    pub async fn list_submissions(
        &self,
        ctx: &AuthContext,
        task_id: TaskId,
    ) -> LedgerServiceResult<Vec<SubmissionEntry>> {
        debug!(task_id = %task_id, user_id = %ctx.user_id(), "listing submissions");
        let mut submissions = self.submissions.list_for_task(task_id).await?;
        submissions.sort_by_key(Submission::created_at);

        let mut authors: HashMap<UserId, Option<UserSummary>> = HashMap::new();
        for author in submissions.iter().map(Submission::user_id) {
            if let Entry::Vacant(slot) = authors.entry(author) {
                slot.insert(self.user_summary(author).await?);
            }
        }
        Ok(submissions
            .into_iter()
            .map(|submission| {
                let user = authors.get(&submission.user_id()).cloned().flatten();
                SubmissionEntry { submission, user }
            })
            .collect())
    }

    /// Returns the newest submission by `user_id` for a task.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerServiceError::Access`] when a student asks about
    /// someone else.
    pub async fn latest_submission(
        &self,
        ctx: &AuthContext,
        task_id: TaskId,
        user_id: UserId,
    ) -> LedgerServiceResult<Option<SubmissionEntry>> {
        require_owner_or_admin(ctx, user_id)?;
        let submissions = self
            .submissions
            .list_for_task_and_user(task_id, user_id)
            .await?;
        let Some(submission) = submissions.into_iter().max_by_key(Submission::created_at)
        else {
            return Ok(None);
        };
        let user = self.user_summary(user_id).await?;
        Ok(Some(SubmissionEntry { submission, user }))
    }

    /// Records a scored sitting of an exam.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerServiceError::Access`] for admins,
    /// [`LedgerServiceError::Domain`] unless `score` is a JSON integer of zero
    /// or more, [`LedgerServiceError::TaskNotFound`] when no such exam
    /// exists, and [`LedgerServiceError::AlreadySubmitted`] when the policy
    /// rejects a second result.
    pub async fn submit_exam_result(
        &self,
        ctx: &AuthContext,
        exam_id: TaskId,
        score: &Value,
        details: Option<Value>,
    ) -> LedgerServiceResult<ExamResultEntry> {
        require_student(ctx)?;
        let points = Score::from_json(score)?;
        let exam = self.find_task(exam_id, TaskKind::Exam).await?;
        let previous = self
            .results
            .list(&ResultFilter {
                exam_id: Some(exam_id),
                user_id: Some(ctx.user_id()),
            })
            .await?;
        ensure_permitted(
            self.config.exam_resubmission.permits(!previous.is_empty()),
            exam_id,
            ctx.user_id(),
        )?;

        let result = ExamResult::record(exam_id, ctx.user_id(), points, details, &*self.clock);
        self.results.append(&result).await?;
        info!(
            result_id = %result.id(),
            exam_id = %exam_id,
            user_id = %ctx.user_id(),
            score = %points,
            "recorded exam result"
        );
        Ok(ExamResultEntry {
            result,
            exam: Some(exam.summary()),
        })
    }

    /// Returns the caller's exam results, newest first, each with its exam.
    ///
    /// # Errors
    ///
    /// Returns a repository error when a lookup fails.
    pub async fn my_results(&self, ctx: &AuthContext) -> LedgerServiceResult<Vec<ExamResultEntry>> {
        debug!(user_id = %ctx.user_id(), "listing own exam results");
        self.results_matching(&ResultFilter::for_user(ctx.user_id()))
            .await
    }

    /// Returns every exam result passing `filter`, newest first, each with
    /// its exam.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerServiceError::Access`] for non-admins.
    pub async fn all_results(
        &self,
        ctx: &AuthContext,
        filter: &ResultFilter,
    ) -> LedgerServiceResult<Vec<ExamResultEntry>> {
        require_admin(ctx)?;
        debug!(user_id = %ctx.user_id(), ?filter, "listing exam results");
        self.results_matching(filter).await
    }

    async fn results_matching(
        &self,
        filter: &ResultFilter,
    ) -> LedgerServiceResult<Vec<ExamResultEntry>> {
        let mut results = self.results.list(filter).await?;
        // Append order reversed first so that equal timestamps stay newest first.
        results.reverse();
        results.sort_by_key(|result| Reverse(result.created_at()));

        let mut exams: HashMap<TaskId, Option<TaskSummary>> = HashMap::new();
        for exam_id in results.iter().map(ExamResult::exam_id) {
            if let Entry::Vacant(slot) = exams.entry(exam_id) {
                let found = self.tasks.find_by_id(exam_id).await?;
                slot.insert(found.map(|task| task.summary()));
            }
        }
        Ok(results
            .into_iter()
            .map(|result| {
                let exam = exams.get(&result.exam_id()).cloned().flatten();
                ExamResultEntry { result, exam }
            })
            .collect())
    }

    async fn find_task(&self, task_id: TaskId, kind: TaskKind) -> LedgerServiceResult<Task> {
        self.tasks
            .find_by_id(task_id)
            .await?
            .filter(|task| task.kind() == kind)
            .ok_or(LedgerServiceError::TaskNotFound { task_id, kind })
    }

    async fn user_summary(&self, user_id: UserId) -> LedgerServiceResult<Option<UserSummary>> {
        Ok(self
            .users
            .find_by_id(user_id)
            .await?
            .map(|user| user.summary()))
    }
}

const fn ensure_permitted(
    permitted: bool,
    task_id: TaskId,
    user_id: UserId,
) -> LedgerServiceResult<()> {
    if permitted {
        Ok(())
    } else {
        Err(LedgerServiceError::AlreadySubmitted { task_id, user_id })
    }
}
