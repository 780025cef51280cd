//! In-memory ledger stores for tests and embedding.

mod result;
mod submission;

pub use result::InMemoryExamResultRepository;
pub use submission::InMemorySubmissionRepository;
