//! Domain model for courses and enrollments.

mod course;
mod enrollment;
mod error;
mod ids;

pub use course::{Course, CoursePatch};
pub use enrollment::{Enrollment, EnrollmentEntry};
pub use error::EnrollmentDomainError;
pub use ids::{CourseId, EnrollmentId};
