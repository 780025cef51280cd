//! Service layer for user registration and credential resolution.

use crate::error::ErrorKind;
use crate::identity::{
    domain::{AuthContext, IdentityDomainError, Role, User, UserId, UserSummary},
    ports::{AuthenticationError, CredentialVerifier, UserRepository, UserRepositoryError},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

/// Request payload for registering a user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterUserRequest {
    name: String,
    email: String,
    role: String,
}

impl RegisterUserRequest {
    /// Creates a request. The role label accepts any casing.
    #[must_use]
    pub fn new(name: impl Into<String>, email: impl Into<String>, role: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            role: role.into(),
        }
    }
}

/// Service-level errors for identity operations.
#[derive(Debug, Error)]
pub enum IdentityServiceError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] IdentityDomainError),
    /// The role label is not `admin` or `student`.
    #[error("unknown role '{0}'")]
    UnknownRole(String),
    /// The credential could not be resolved.
    #[error(transparent)]
    Authentication(#[from] AuthenticationError),
    /// The referenced user does not exist.
    #[error("user not found: {0}")]
    UserNotFound(UserId),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] UserRepositoryError),
}

impl IdentityServiceError {
    /// Classifies the failure.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Domain(_) | Self::UnknownRole(_) => ErrorKind::BadRequest,
            Self::Authentication(_) => ErrorKind::Unauthenticated,
            Self::UserNotFound(_) => ErrorKind::NotFound,
            Self::Repository(UserRepositoryError::DuplicateEmail(_)) => ErrorKind::Conflict,
            Self::Repository(_) => ErrorKind::Internal,
        }
    }
}

/// Result type for identity service operations.
pub type IdentityServiceResult<T> = Result<T, IdentityServiceError>;

/// Identity orchestration service.
#[derive(Clone)]
pub struct IdentityService<R, V, C>
where
    R: UserRepository,
    V: CredentialVerifier,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    verifier: Arc<V>,
    clock: Arc<C>,
}

impl<R, V, C> IdentityService<R, V, C>
where
    R: UserRepository,
    V: CredentialVerifier,
    C: Clock + Send + Sync,
{
    /// Creates a new identity service.
    #[must_use]
    pub const fn new(repository: Arc<R>, verifier: Arc<V>, clock: Arc<C>) -> Self {
        Self {
            repository,
            verifier,
            clock,
        }
    }

    /// Registers a user account.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityServiceError::Domain`] or
    /// [`IdentityServiceError::UnknownRole`] for invalid input, and
    /// [`IdentityServiceError::Repository`] when the email address is taken
    /// or persistence fails.
    pub async fn register_user(&self, request: RegisterUserRequest) -> IdentityServiceResult<User> {
        let RegisterUserRequest { name, email, role } = request;
        let parsed_role =
            Role::try_from(role.as_str()).map_err(|err| IdentityServiceError::UnknownRole(err.0))?;
        let user = User::new(name, email, parsed_role, &*self.clock)?;
        self.repository.store(&user).await?;
        info!(user_id = %user.id(), role = %user.role(), "registered user");
        Ok(user)
    }

    /// Resolves a bearer credential into a caller context.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityServiceError::Authentication`] when verification
    /// fails.
    pub fn authenticate(&self, credential: &str) -> IdentityServiceResult<AuthContext> {
        let context = self.verifier.verify(credential)?;
        debug!(user_id = %context.user_id(), role = %context.role(), "resolved credential");
        Ok(context)
    }

    /// Finds a user by identifier.
    ///
    /// Returns `Ok(None)` when the user does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityServiceError::Repository`] when lookup fails.
    pub async fn find_user(&self, id: UserId) -> IdentityServiceResult<Option<User>> {
        Ok(self.repository.find_by_id(id).await?)
    }

    /// Returns the public summary of the caller's own account.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityServiceError::UserNotFound`] when the account has
    /// no stored record.
    pub async fn profile(&self, ctx: &AuthContext) -> IdentityServiceResult<UserSummary> {
        self.repository
            .find_by_id(ctx.user_id())
            .await?
            .map(|user| user.summary())
            .ok_or(IdentityServiceError::UserNotFound(ctx.user_id()))
    }
}
