//! In-memory course store.

use async_trait::async_trait;
use std::sync::{Arc, RwLock};

use crate::enrollment::{
    domain::{Course, CourseId},
    ports::{CourseRepository, EnrollmentRepositoryError, EnrollmentRepositoryResult},
};

/// Thread-safe in-memory course repository. Keeps creation order.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCourseRepository {
    state: Arc<RwLock<Vec<Course>>>,
}

impl InMemoryCourseRepository {
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
impl CourseRepository for InMemoryCourseRepository {
    async fn store(&self, course: &Course) -> EnrollmentRepositoryResult<()> {
        let mut courses = self.state.write().map_err(|err| poisoned(&err))?;
        if courses.iter().any(|existing| existing.id() == course.id()) {
            return Err(EnrollmentRepositoryError::DuplicateCourse(course.id()));
        }
        courses.push(course.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: CourseId) -> EnrollmentRepositoryResult<Option<Course>> {
        let courses = self.state.read().map_err(|err| poisoned(&err))?;
        Ok(courses.iter().find(|course| course.id() == id).cloned())
    }

    async fn list_all(&self) -> EnrollmentRepositoryResult<Vec<Course>> {
        let courses = self.state.read().map_err(|err| poisoned(&err))?;
        Ok(courses.clone())
    }

    async fn update(&self, course: &Course) -> EnrollmentRepositoryResult<()> {
        let mut courses = self.state.write().map_err(|err| poisoned(&err))?;
        let slot = courses
            .iter_mut()
            .find(|existing| existing.id() == course.id())
            .ok_or(EnrollmentRepositoryError::CourseNotFound(course.id()))?;
        *slot = course.clone();
        Ok(())
    }

    async fn remove(&self, id: CourseId) -> EnrollmentRepositoryResult<Course> {
        let mut courses = self.state.write().map_err(|err| poisoned(&err))?;
        let position = courses
            .iter()
            .position(|course| course.id() == id)
            .ok_or(EnrollmentRepositoryError::CourseNotFound(id))?;
        Ok(courses.remove(position))
    }
}
