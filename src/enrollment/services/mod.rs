//! Application services for courses and enrollments.

mod enrollment;

pub use enrollment::{EnrollmentService, EnrollmentServiceError, EnrollmentServiceResult};
