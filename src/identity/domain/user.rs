//! User account record and its public summary.

use super::{IdentityDomainError, Role, UserId};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Registered user account.
///
/// Credential material is owned by the external identity collaborator and is
/// not modelled here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    id: UserId,
    name: String,
    email: String,
    role: Role,
    created_at: DateTime<Utc>,
}

impl User {
    /// Creates a new user account.
    ///
    /// The email address is trimmed and lowercased.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityDomainError::EmptyName`] or
    /// [`IdentityDomainError::InvalidEmail`] when validation fails.
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        role: Role,
        clock: &impl Clock,
    ) -> Result<Self, IdentityDomainError> {
        let raw_name = name.into();
        let trimmed_name = raw_name.trim();
        if trimmed_name.is_empty() {
            return Err(IdentityDomainError::EmptyName);
        }

        let raw_email = email.into();
        let normalized_email = raw_email.trim().to_ascii_lowercase();
        if !is_plausible_email(&normalized_email) {
            return Err(IdentityDomainError::InvalidEmail(raw_email));
        }

        Ok(Self {
            id: UserId::new(),
            name: trimmed_name.to_owned(),
            email: normalized_email,
            role,
            created_at: clock.utc(),
        })
    }

    /// Returns the user identifier.
    #[must_use]
    pub const fn id(&self) -> UserId {
        self.id
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the normalized email address.
    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Returns the immutable role.
    #[must_use]
    pub const fn role(&self) -> Role {
        self.role
    }

    /// Returns the registration timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the public summary joined onto ledger entries.
    #[must_use]
    pub fn summary(&self) -> UserSummary {
        UserSummary {
            id: self.id,
            name: self.name.clone(),
            email: self.email.clone(),
            role: self.role,
        }
    }
}

fn is_plausible_email(value: &str) -> bool {
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.is_empty()
        && !domain.contains('@')
        && !value.chars().any(char::is_whitespace)
}

/// Public projection of a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSummary {
    /// User identifier.
    pub id: UserId,
    /// Display name.
    pub name: String,
    /// Email address.
    pub email: String,
    /// Role.
    pub role: Role,
}
