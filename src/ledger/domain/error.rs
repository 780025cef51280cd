//! Error types for ledger record validation.

use thiserror::Error;

/// Errors returned while building ledger records.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LedgerDomainError {
    /// The score is not a JSON integer of zero or more.
    #[error("score must be a non-negative integer, got {0}")]
    InvalidScore(String),
}
