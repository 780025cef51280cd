//! Repository ports for courses and enrollments.

use crate::enrollment::domain::{Course, CourseId, Enrollment, EnrollmentId};
use crate::identity::domain::UserId;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for enrollment repository operations.
pub type EnrollmentRepositoryResult<T> = Result<T, EnrollmentRepositoryError>;

/// Course persistence contract.
#[async_trait]
pub trait CourseRepository: Send + Sync {
    /// Stores a new course.
    ///
    /// # Errors
    ///
    /// Returns [`EnrollmentRepositoryError::DuplicateCourse`] when the
    /// identifier already exists.
    async fn store(&self, course: &Course) -> EnrollmentRepositoryResult<()>;

    /// Finds a course by identifier.
    async fn find_by_id(&self, id: CourseId) -> EnrollmentRepositoryResult<Option<Course>>;

    /// Returns every course in creation order.
    async fn list_all(&self) -> EnrollmentRepositoryResult<Vec<Course>>;

    /// Replaces a stored course, keeping its position in the listing.
    ///
    /// # Errors
    ///
    /// Returns [`EnrollmentRepositoryError::CourseNotFound`] when it does not
    /// exist.
    async fn update(&self, course: &Course) -> EnrollmentRepositoryResult<()>;

    /// Removes a course and returns it.
    ///
    /// # Errors
    ///
    /// Returns [`EnrollmentRepositoryError::CourseNotFound`] when it does not
    /// exist.
    async fn remove(&self, id: CourseId) -> EnrollmentRepositoryResult<Course>;
}

/// Enrollment persistence contract.
#[async_trait]
pub trait EnrollmentRepository: Send + Sync {
    /// Stores a new enrollment.
    ///
    /// # Errors
    ///
    /// Returns [`EnrollmentRepositoryError::DuplicateEnrollment`] when the
    /// user is already enrolled on the course. The check and the insert are
    /// one atomic step.
    async fn store(&self, enrollment: &Enrollment) -> EnrollmentRepositoryResult<()>;

    /// Finds an enrollment by identifier.
    async fn find_by_id(&self, id: EnrollmentId)
    -> EnrollmentRepositoryResult<Option<Enrollment>>;

    /// Finds the enrollment of `user_id` on `course_id`.
    async fn find_for(
        &self,
        user_id: UserId,
        course_id: CourseId,
    ) -> EnrollmentRepositoryResult<Option<Enrollment>>;

    /// Returns the enrollments of one user in creation order.
    async fn list_for_user(&self, user_id: UserId) -> EnrollmentRepositoryResult<Vec<Enrollment>>;

    /// Returns every enrollment in creation order.
    async fn list_all(&self) -> EnrollmentRepositoryResult<Vec<Enrollment>>;

    /// Removes an enrollment and returns it.
    ///
    /// # Errors
    ///
    /// Returns [`EnrollmentRepositoryError::NotFound`] when it does not exist.
    async fn remove(&self, id: EnrollmentId) -> EnrollmentRepositoryResult<Enrollment>;

    /// Removes every enrollment on a course and returns how many went.
    async fn remove_for_course(&self, course_id: CourseId) -> EnrollmentRepositoryResult<usize>;
}

/// Errors returned by course and enrollment repositories.
#[derive(Debug, Clone, Error)]
pub enum EnrollmentRepositoryError {
    /// A course with the same identifier already exists.
    #[error("duplicate course identifier: {0}")]
    DuplicateCourse(CourseId),

    /// The user is already enrolled on the course.
    #[error("user {user_id} is already enrolled on course {course_id}")]
    DuplicateEnrollment {
        /// Enrolled user.
        user_id: UserId,
        /// Course.
        course_id: CourseId,
    },

    /// The course was not found.
    #[error("course not found: {0}")]
    CourseNotFound(CourseId),

    /// The enrollment was not found.
    #[error("enrollment not found: {0}")]
    NotFound(EnrollmentId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl EnrollmentRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
