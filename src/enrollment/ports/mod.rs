//! Port contracts for courses and enrollments.

mod repository;

pub use repository::{
    CourseRepository, EnrollmentRepository, EnrollmentRepositoryError, EnrollmentRepositoryResult,
};
