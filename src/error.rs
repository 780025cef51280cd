//! Error kind taxonomy shared by every service error.
//!
//! Each service defines its own `thiserror` enum; callers that only need to
//! decide how to surface a failure ask for its [`ErrorKind`].

use serde::{Deserialize, Serialize};
use std::fmt;

/// Classification of a service failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// The credential was missing or could not be verified.
    Unauthenticated,
    /// The caller is known but lacks the role or ownership required.
    Forbidden,
    /// A referenced record does not exist.
    NotFound,
    /// The input was malformed.
    BadRequest,
    /// The write would duplicate an existing record.
    Conflict,
    /// A storage collaborator failed.
    Internal,
}

impl ErrorKind {
    /// Returns the canonical string representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Unauthenticated => "unauthenticated",
            Self::Forbidden => "forbidden",
            Self::NotFound => "not_found",
            Self::BadRequest => "bad_request",
            Self::Conflict => "conflict",
            Self::Internal => "internal",
        }
    }

    /// Returns the HTTP status code an outer transport should report.
    ///
    /// Duplicate writes are reported as `400`, matching the client contract
    /// for enrollment.
    #[must_use]
    pub const fn http_status(self) -> u16 {
        match self {
            Self::Unauthenticated => 401,
            Self::Forbidden => 403,
            Self::NotFound => 404,
            Self::BadRequest | Self::Conflict => 400,
            Self::Internal => 500,
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
