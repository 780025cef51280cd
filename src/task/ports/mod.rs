//! Port contracts for the task store.
//!
//! Ports define infrastructure-agnostic interfaces used by task services.

pub mod dependents;
pub mod repository;

pub use dependents::{DependentPurgeError, TaskDependents};
pub use repository::{TaskRepository, TaskRepositoryError, TaskRepositoryResult};
