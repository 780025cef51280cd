//! Domain model for the submission ledger.

mod entry;
mod error;
mod ids;
mod policy;
mod result;
mod submission;

pub use entry::{ExamResultEntry, ResultFilter, SubmissionEntry, SubmissionReceipt};
pub use error::LedgerDomainError;
pub use ids::{ExamResultId, SubmissionId};
pub use policy::ResubmissionPolicy;
pub use result::{ExamResult, Score};
pub use submission::Submission;
