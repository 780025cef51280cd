//! Identity and role context for Lyceum.
//!
//! Resolves an opaque bearer credential into an [`domain::AuthContext`]
//! carrying the caller's user identifier and closed [`domain::Role`]. Every
//! downstream operation receives this context explicitly and never sees the
//! raw credential. The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;
