//! In-memory course and enrollment stores.

mod course;
mod enrollment;

pub use course::InMemoryCourseRepository;
pub use enrollment::InMemoryEnrollmentRepository;
