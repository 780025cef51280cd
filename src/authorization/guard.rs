//! Role and ownership predicates.

use crate::identity::domain::{AuthContext, Role, UserId};
use thiserror::Error;
use tracing::warn;

/// Reasons a guard rejected the caller.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum AccessDenied {
    /// The operation is reserved for admins.
    #[error("user {user_id} with role {role} is not an admin")]
    AdminRequired {
        /// Rejected caller.
        user_id: UserId,
        /// Caller's role.
        role: Role,
    },

    /// The operation is reserved for students.
    #[error("user {user_id} with role {role} is not a student")]
    StudentRequired {
        /// Rejected caller.
        user_id: UserId,
        /// Caller's role.
        role: Role,
    },

    /// The caller neither owns the resource nor is an admin.
    #[error("user {user_id} does not own a resource belonging to {owner}")]
    NotOwner {
        /// Rejected caller.
        user_id: UserId,
        /// Owner of the resource.
        owner: UserId,
    },
}

/// Fails unless the caller is an admin.
///
/// # Errors
///
/// Returns [`AccessDenied::AdminRequired`] for any other role.
pub fn require_admin(ctx: &AuthContext) -> Result<(), AccessDenied> {
    if ctx.is_admin() {
        return Ok(());
    }
    deny(AccessDenied::AdminRequired {
        user_id: ctx.user_id(),
        role: ctx.role(),
    })
}

/// Fails unless the caller is a student.
///
/// # Errors
///
/// Returns [`AccessDenied::StudentRequired`] for admins.
pub fn require_student(ctx: &AuthContext) -> Result<(), AccessDenied> {
    if !ctx.is_admin() {
        return Ok(());
    }
    deny(AccessDenied::StudentRequired {
        user_id: ctx.user_id(),
        role: ctx.role(),
    })
}

/// Fails unless the caller is an admin or owns the resource.
///
/// # Errors
///
/// Returns [`AccessDenied::NotOwner`] when neither holds.
pub fn require_owner_or_admin(ctx: &AuthContext, owner: UserId) -> Result<(), AccessDenied> {
    if ctx.is_admin() || ctx.user_id() == owner {
        return Ok(());
    }
    deny(AccessDenied::NotOwner {
        user_id: ctx.user_id(),
        owner,
    })
}

fn deny(reason: AccessDenied) -> Result<(), AccessDenied> {
    warn!(%reason, "access denied");
    Err(reason)
}
