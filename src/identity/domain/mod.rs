//! Domain model for identity resolution.
//!
//! Users carry a closed two-value role. Role strings arriving from outside the
//! crate are normalized once, here, and every later check compares enum
//! values.

mod context;
mod error;
mod ids;
mod role;
mod user;

pub use context::AuthContext;
pub use error::{IdentityDomainError, ParseRoleError};
pub use ids::UserId;
pub use role::Role;
pub use user::{User, UserSummary};
