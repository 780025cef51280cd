//! Adapter implementations for identity ports.

pub mod jwt;
pub mod memory;

pub use jwt::{Claims, JwtCredentialVerifier, TokenIssueError, TokenIssuer, extract_bearer_token};
