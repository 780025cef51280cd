//! Resolved caller context.

use super::{Role, UserId};
use serde::{Deserialize, Serialize};

/// Identity of the caller for one operation.
///
/// Produced only by credential verification and passed by reference into
/// every service call that needs to know who is acting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AuthContext {
    user_id: UserId,
    role: Role,
}

impl AuthContext {
    /// Creates a context for the given user and role.
    #[must_use]
    pub const fn new(user_id: UserId, role: Role) -> Self {
        Self { user_id, role }
    }

    /// Returns the caller's user identifier.
    #[must_use]
    pub const fn user_id(&self) -> UserId {
        self.user_id
    }

    /// Returns the caller's role.
    #[must_use]
    pub const fn role(&self) -> Role {
        self.role
    }

    /// Returns `true` when the caller is an admin.
    #[must_use]
    pub const fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}
