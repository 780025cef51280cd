//! Application services for identity resolution.

mod identity;

pub use identity::{IdentityService, IdentityServiceError, RegisterUserRequest};
