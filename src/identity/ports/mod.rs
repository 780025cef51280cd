//! Port contracts for identity resolution.
//!
//! Ports define infrastructure-agnostic interfaces used by identity services.

pub mod repository;
pub mod verifier;

pub use repository::{UserRepository, UserRepositoryError, UserRepositoryResult};
pub use verifier::{AuthenticationError, CredentialVerifier};
