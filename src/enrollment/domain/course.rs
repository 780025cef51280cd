//! Courses students enroll in.

use super::{CourseId, EnrollmentDomainError};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Partial update to a course. Unset fields are left alone.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoursePatch {
    /// New title.
    #[serde(default)]
    pub title: Option<String>,
    /// New description.
    #[serde(default)]
    pub description: Option<String>,
}

/// A course offered by an admin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    id: CourseId,
    title: String,
    description: String,
    created_at: DateTime<Utc>,
}

impl Course {
    /// Creates a course with trimmed title and description.
    ///
    /// # Errors
    ///
    /// Returns [`EnrollmentDomainError::EmptyTitle`] or
    /// [`EnrollmentDomainError::EmptyDescription`] when a field is blank.
    pub fn new(
        title: &str,
        description: &str,
        clock: &impl Clock,
    ) -> Result<Self, EnrollmentDomainError> {
        let trimmed_title = title.trim();
        if trimmed_title.is_empty() {
            return Err(EnrollmentDomainError::EmptyTitle);
        }
        let trimmed_description = description.trim();
        if trimmed_description.is_empty() {
            return Err(EnrollmentDomainError::EmptyDescription);
        }
        Ok(Self {
            id: CourseId::new(),
            title: trimmed_title.to_owned(),
            description: trimmed_description.to_owned(),
            created_at: clock.utc(),
        })
    }

    /// Applies `patch`, trimming each supplied field.
    ///
    /// Both fields are checked before either is written. Returns whether
    /// anything changed.
    ///
    /// # Errors
    ///
    /// Returns [`EnrollmentDomainError::EmptyTitle`] or
    /// [`EnrollmentDomainError::EmptyDescription`] when a supplied field is
    /// blank.
    pub fn revise(&mut self, patch: &CoursePatch) -> Result<bool, EnrollmentDomainError> {
        let title = patch.title.as_deref().map(str::trim);
        if title.is_some_and(str::is_empty) {
            return Err(EnrollmentDomainError::EmptyTitle);
        }
        let description = patch.description.as_deref().map(str::trim);
        if description.is_some_and(str::is_empty) {
            return Err(EnrollmentDomainError::EmptyDescription);
        }

        let mut changed = false;
        if let Some(value) = title.filter(|value| *value != self.title) {
            value.clone_into(&mut self.title);
            changed = true;
        }
        if let Some(value) = description.filter(|value| *value != self.description) {
            value.clone_into(&mut self.description);
            changed = true;
        }
        Ok(changed)
    }

    /// Returns the course identifier.
    #[must_use]
    pub const fn id(&self) -> CourseId {
        self.id
    }

    /// Returns the title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns when the course was created.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
