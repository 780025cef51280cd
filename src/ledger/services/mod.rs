//! Application services for the submission ledger.

mod ledger;

pub use ledger::{LedgerServiceError, LedgerServiceResult, SubmissionLedgerService};
