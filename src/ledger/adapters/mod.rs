//! Adapter implementations for the submission ledger.

mod dependents;
pub mod memory;

pub use dependents::LedgerDependents;
