//! Service layer for courses and enrollments.

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::sync::Arc;

use crate::authorization::{AccessDenied, require_admin, require_owner_or_admin};
use crate::enrollment::{
    domain::{
        Course, CourseId, CoursePatch, Enrollment, EnrollmentDomainError, EnrollmentEntry,
        EnrollmentId,
    },
    ports::{CourseRepository, EnrollmentRepository, EnrollmentRepositoryError},
};
use crate::error::ErrorKind;
use crate::identity::{
    domain::{AuthContext, UserId, UserSummary},
    ports::{UserRepository, UserRepositoryError},
};
use mockable::Clock;
use thiserror::Error;
use tracing::{debug, info};

/// Service-level errors for course and enrollment operations.
#[derive(Debug, Error)]
pub enum EnrollmentServiceError {
    /// A guard rejected the caller.
    #[error(transparent)]
    Access(#[from] AccessDenied),
    /// Course validation failed.
    #[error(transparent)]
    Domain(#[from] EnrollmentDomainError),
    /// The course does not exist.
    #[error("course not found: {0}")]
    CourseNotFound(CourseId),
    /// The enrollment does not exist.
    #[error("enrollment not found: {0}")]
    EnrollmentNotFound(EnrollmentId),
    /// The caller is already enrolled on the course.
    #[error("already enrolled on course {course_id}")]
    AlreadyEnrolled {
        /// Existing enrollment.
        enrollment_id: EnrollmentId,
        /// Course.
        course_id: CourseId,
    },
    /// Course or enrollment repository operation failed.
    #[error(transparent)]
    Repository(#[from] EnrollmentRepositoryError),
    /// User directory lookup failed.
    #[error(transparent)]
    Users(#[from] UserRepositoryError),
}

impl EnrollmentServiceError {
    /// Classifies the failure.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Access(_) => ErrorKind::Forbidden,
            Self::Domain(_) => ErrorKind::BadRequest,
            Self::CourseNotFound(_)
            | Self::EnrollmentNotFound(_)
            | Self::Repository(
                EnrollmentRepositoryError::NotFound(_)
                | EnrollmentRepositoryError::CourseNotFound(_),
            ) => ErrorKind::NotFound,
            Self::AlreadyEnrolled { .. }
            | Self::Repository(
                EnrollmentRepositoryError::DuplicateEnrollment { .. }
                | EnrollmentRepositoryError::DuplicateCourse(_),
            ) => ErrorKind::Conflict,
            Self::Repository(EnrollmentRepositoryError::Persistence(_)) | Self::Users(_) => {
                ErrorKind::Internal
            }
        }
    }
}

/// Result type for enrollment service operations.
pub type EnrollmentServiceResult<T> = Result<T, EnrollmentServiceError>;

/// Course and enrollment orchestration service.
#[derive(Clone)]
pub struct EnrollmentService<K, E, U, C>
where
    K: CourseRepository,
    E: EnrollmentRepository,
    U: UserRepository,
    C: Clock + Send + Sync,
{
    courses: Arc<K>,
    enrollments: Arc<E>,
    users: Arc<U>,
    clock: Arc<C>,
}

impl<K, E, U, C> EnrollmentService<K, E, U, C>
where
    K: CourseRepository,
    E: EnrollmentRepository,
    U: UserRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new enrollment service.
    #[must_use]
    pub const fn new(courses: Arc<K>, enrollments: Arc<E>, users: Arc<U>, clock: Arc<C>) -> Self {
        Self {
            courses,
            enrollments,
            users,
            clock,
        }
    }

    /// Creates a course.
    ///
    /// # Errors
    ///
    /// Returns [`EnrollmentServiceError::Access`] for non-admins and
    /// [`EnrollmentServiceError::Domain`] for a blank title or description.
    pub async fn create_course(
        &self,
        ctx: &AuthContext,
        title: &str,
        description: &str,
    ) -> EnrollmentServiceResult<Course> {
        require_admin(ctx)?;
        let course = Course::new(title, description, &*self.clock)?;
        self.courses.store(&course).await?;
        info!(course_id = %course.id(), user_id = %ctx.user_id(), "created course");
        Ok(course)
    }

    /// Returns every course. Needs no caller context.
    ///
    /// # Errors
    ///
    /// Returns a repository error when listing fails.
    pub async fn list_courses(&self) -> EnrollmentServiceResult<Vec<Course>> {
        Ok(self.courses.list_all().await?)
    }

    /// Returns one course.
    ///
    /// # Errors
    ///
    /// Returns [`EnrollmentServiceError::CourseNotFound`] when it does not
    /// exist.
    pub async fn get_course(&self, course_id: CourseId) -> EnrollmentServiceResult<Course> {
        self.courses
            .find_by_id(course_id)
            .await?
            .ok_or(EnrollmentServiceError::CourseNotFound(course_id))
    }

    /// Changes a course's title or description.
    ///
    /// # Errors
    ///
    /// Returns [`EnrollmentServiceError::Access`] for non-admins,
    /// [`EnrollmentServiceError::CourseNotFound`] for an unknown course and
    /// [`EnrollmentServiceError::Domain`] for a blank field.
    pub async fn update_course(
        &self,
        ctx: &AuthContext,
        course_id: CourseId,
        patch: &CoursePatch,
    ) -> EnrollmentServiceResult<Course> {
        require_admin(ctx)?;
        let mut course = self.get_course(course_id).await?;
        if !course.revise(patch)? {
            return Ok(course);
        }
        self.courses.update(&course).await?;
        info!(course_id = %course_id, user_id = %ctx.user_id(), "updated course");
        Ok(course)
    }

    /// Deletes a course together with every enrollment on it.
    ///
    /// The course goes first so that no new enrollment can find it; the
    /// enrollments left behind are then removed.
    ///
    /// # Errors
    ///
    /// Returns [`EnrollmentServiceError::Access`] for non-admins and
    /// [`EnrollmentServiceError::CourseNotFound`] for an unknown course.
    pub async fn delete_course(
        &self,
        ctx: &AuthContext,
        course_id: CourseId,
    ) -> EnrollmentServiceResult<Course> {
        require_admin(ctx)?;
        let removed = match self.courses.remove(course_id).await {
            Ok(course) => course,
            Err(EnrollmentRepositoryError::CourseNotFound(_)) => {
                return Err(EnrollmentServiceError::CourseNotFound(course_id));
            }
            Err(err) => return Err(err.into()),
        };
        let purged = self.enrollments.remove_for_course(course_id).await?;
        info!(
            course_id = %course_id,
            user_id = %ctx.user_id(),
            enrollments = purged,
            "deleted course"
        );
        Ok(removed)
    }

    /// Enrolls the caller on a course.
    ///
    /// An existing enrollment is looked up first; the store then rejects a
    /// duplicate that slipped in between, so both paths surface as a
    /// conflict.
    ///
    /// # Errors
    ///
    /// Returns [`EnrollmentServiceError::CourseNotFound`] for an unknown
    /// course and [`EnrollmentServiceError::AlreadyEnrolled`] or
    /// [`EnrollmentServiceError::Repository`] with a duplicate when the
    /// caller is already enrolled.
    pub async fn enroll(
        &self,
        ctx: &AuthContext,
        course_id: CourseId,
    ) -> EnrollmentServiceResult<EnrollmentEntry> {
        let course = self.get_course(course_id).await?;
        if let Some(existing) = self.enrollments.find_for(ctx.user_id(), course_id).await? {
            return Err(EnrollmentServiceError::AlreadyEnrolled {
                enrollment_id: existing.id(),
                course_id,
            });
        }

        let enrollment = Enrollment::new(ctx.user_id(), course_id, &*self.clock);
        self.enrollments.store(&enrollment).await?;
        info!(
            enrollment_id = %enrollment.id(),
            course_id = %course_id,
            user_id = %ctx.user_id(),
            "enrolled user"
        );
        let user = self.user_summary(ctx.user_id()).await?;
        Ok(EnrollmentEntry {
            enrollment,
            course: Some(course),
            user,
        })
    }

    /// Returns the caller's enrollments with their courses.
    ///
    /// # Errors
    ///
    /// Returns a repository error when a lookup fails.
    pub async fn my_enrollments(
        &self,
        ctx: &AuthContext,
    ) -> EnrollmentServiceResult<Vec<EnrollmentEntry>> {
        debug!(user_id = %ctx.user_id(), "listing own enrollments");
        let rows = self.enrollments.list_for_user(ctx.user_id()).await?;
        self.join(rows).await
    }

    /// Returns every enrollment with its course and user.
    ///
    /// # Errors
    ///
    /// Returns [`EnrollmentServiceError::Access`] for non-admins.
    pub async fn all_enrollments(
        &self,
        ctx: &AuthContext,
    ) -> EnrollmentServiceResult<Vec<EnrollmentEntry>> {
        require_admin(ctx)?;
        debug!(user_id = %ctx.user_id(), "listing all enrollments");
        let rows = self.enrollments.list_all().await?;
        self.join(rows).await
    }

    /// Removes an enrollment. The enrolled user and admins may do this.
    ///
    /// # Errors
    ///
    /// Returns [`EnrollmentServiceError::EnrollmentNotFound`] when it does
    /// not exist and [`EnrollmentServiceError::Access`] when the caller is
    /// neither its owner nor an admin.
    pub async fn withdraw(
        &self,
        ctx: &AuthContext,
        enrollment_id: EnrollmentId,
    ) -> EnrollmentServiceResult<Enrollment> {
        let enrollment = self
            .enrollments
            .find_by_id(enrollment_id)
            .await?
            .ok_or(EnrollmentServiceError::EnrollmentNotFound(enrollment_id))?;
        require_owner_or_admin(ctx, enrollment.user_id())?;

        let removed = self.enrollments.remove(enrollment_id).await?;
        info!(
            enrollment_id = %enrollment_id,
            user_id = %ctx.user_id(),
            "removed enrollment"
        );
        Ok(removed)
    }

    async fn join(&self, rows: Vec<Enrollment>) -> EnrollmentServiceResult<Vec<EnrollmentEntry>> {
        let mut courses: HashMap<CourseId, Option<Course>> = HashMap::new();
        let mut users: HashMap<UserId, Option<UserSummary>> = HashMap::new();
        for row in &rows {
            if let Entry::Vacant(slot) = courses.entry(row.course_id()) {
                slot.insert(self.courses.find_by_id(row.course_id()).await?);
            }
            if let Entry::Vacant(slot) = users.entry(row.user_id()) {
                slot.insert(self.user_summary(row.user_id()).await?);
            }
        }
        Ok(rows
            .into_iter()
            .map(|enrollment| EnrollmentEntry {
                course: courses.get(&enrollment.course_id()).cloned().flatten(),
                user: users.get(&enrollment.user_id()).cloned().flatten(),
                enrollment,
            })
            .collect())
    }

    async fn user_summary(&self, user_id: UserId) -> EnrollmentServiceResult<Option<UserSummary>> {
        Ok(self
            .users
            .find_by_id(user_id)
            .await?
            .map(|user| user.summary()))
    }
}
