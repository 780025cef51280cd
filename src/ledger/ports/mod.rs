//! Port contracts for the submission ledger.

mod repository;

pub use repository::{
    ExamResultRepository, LedgerRepositoryError, LedgerRepositoryResult, SubmissionRepository,
};
