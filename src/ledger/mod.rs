//! Submission ledger for Lyceum.
//!
//! Students hand in assignments as free-form submissions and sit exams as
//! scored results. Both are append-oriented records tied to a task and a
//! user. Handing in an assignment also marks it completed. Whether a second
//! entry for the same task and user is appended or rejected is a configured
//! [`domain::ResubmissionPolicy`].
//!
//! - Records and value types in [`domain`]
//! - Storage contracts in [`ports`]
//! - In-memory stores and the task-deletion hook in [`adapters`]
//! - The ledger service in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
