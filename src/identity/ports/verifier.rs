//! Credential verification port.

use crate::identity::domain::AuthContext;
use thiserror::Error;

/// Resolves an opaque bearer credential into a caller context.
///
/// Verification is a pure function of the credential and the verifier's
/// construction-time configuration; it performs no storage access.
pub trait CredentialVerifier: Send + Sync {
    /// Verifies the credential and returns the caller context.
    ///
    /// # Errors
    ///
    /// Returns [`AuthenticationError`] when the credential is missing,
    /// malformed, expired, or carries an unknown role.
    fn verify(&self, credential: &str) -> Result<AuthContext, AuthenticationError>;
}

/// Reasons a credential could not be resolved.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AuthenticationError {
    /// No credential was supplied.
    #[error("no credential provided")]
    MissingCredential,

    /// The credential has expired.
    #[error("credential expired")]
    Expired,

    /// The credential failed signature or structure validation.
    #[error("invalid credential: {0}")]
    InvalidCredential(String),

    /// The credential subject is not a valid user identifier.
    #[error("invalid credential subject '{0}'")]
    InvalidSubject(String),

    /// The credential carries a role outside the closed enumeration.
    #[error("unknown role '{0}' in credential")]
    UnknownRole(String),
}
