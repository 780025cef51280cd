//! Error types for course validation.

use thiserror::Error;

/// Errors returned while creating courses.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EnrollmentDomainError {
    /// The course title is empty after trimming.
    #[error("course title must not be empty")]
    EmptyTitle,

    /// The course description is empty after trimming.
    #[error("course description must not be empty")]
    EmptyDescription,
}
