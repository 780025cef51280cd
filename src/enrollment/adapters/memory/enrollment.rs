//! In-memory enrollment store.

use async_trait::async_trait;
use std::sync::{Arc, RwLock};

use crate::enrollment::{
    domain::{CourseId, Enrollment, EnrollmentId},
    ports::{EnrollmentRepository, EnrollmentRepositoryError, EnrollmentRepositoryResult},
};
use crate::identity::domain::UserId;

/// Thread-safe in-memory enrollment repository.
///
/// Uniqueness of `(user, course)` is checked under the same write lock as
/// the insert.
#[derive(Debug, Clone, Default)]
pub struct InMemoryEnrollmentRepository {
    state: Arc<RwLock<Vec<Enrollment>>>,
}

impl InMemoryEnrollmentRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned(err: &impl ToString) -> EnrollmentRepositoryError {
    EnrollmentRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl EnrollmentRepository for InMemoryEnrollmentRepository {
    async fn store(&self, enrollment: &Enrollment) -> EnrollmentRepositoryResult<()> {
        let mut rows = self.state.write().map_err(|err| poisoned(&err))?;
        let taken = rows.iter().any(|row| {
            row.id() == enrollment.id()
                || (row.user_id() == enrollment.user_id()
                    && row.course_id() == enrollment.course_id())
        });
        if taken {
            return Err(EnrollmentRepositoryError::DuplicateEnrollment {
                user_id: enrollment.user_id(),
                course_id: enrollment.course_id(),
            });
        }
        rows.push(enrollment.clone());
        Ok(())
    }

    async fn find_by_id(
        &self,
        id: EnrollmentId,
    ) -> EnrollmentRepositoryResult<Option<Enrollment>> {
        let rows = self.state.read().map_err(|err| poisoned(&err))?;
        Ok(rows.iter().find(|row| row.id() == id).cloned())
    }

    async fn find_for(
        &self,
        user_id: UserId,
        course_id: CourseId,
    ) -> EnrollmentRepositoryResult<Option<Enrollment>> {
        let rows = self.state.read().map_err(|err| poisoned(&err))?;
        Ok(rows
            .iter()
            .find(|row| row.user_id() == user_id && row.course_id() == course_id)
            .cloned())
    }

    async fn list_for_user(&self, user_id: UserId) -> EnrollmentRepositoryResult<Vec<Enrollment>> {
        let rows = self.state.read().map_err(|err| poisoned(&err))?;
        Ok(rows
            .iter()
            .filter(|row| row.user_id() == user_id)
            .cloned()
            .collect())
    }

    async fn list_all(&self) -> EnrollmentRepositoryResult<Vec<Enrollment>> {
        let rows = self.state.read().map_err(|err| poisoned(&err))?;
        Ok(rows.clone())
    }

    async fn remove(&self, id: EnrollmentId) -> EnrollmentRepositoryResult<Enrollment> {
        let mut rows = self.state.write().map_err(|err| poisoned(&err))?;
        let position = rows
            .iter()
            .position(|row| row.id() == id)
            .ok_or(EnrollmentRepositoryError::NotFound(id))?;
        Ok(rows.remove(position))
    }

    async fn remove_for_course(&self, course_id: CourseId) -> EnrollmentRepositoryResult<usize> {
        let mut rows = self.state.write().map_err(|err| poisoned(&err))?;
        let before = rows.len();
        rows.retain(|row| row.course_id() != course_id);
        Ok(before.saturating_sub(rows.len()))
    }
}
