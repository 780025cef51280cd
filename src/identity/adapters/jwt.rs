//! HMAC-signed JSON Web Token credentials.
//!
//! Tokens are signed with HS256. The `role` claim is kept as a raw string in
//! [`Claims`] and normalized into [`Role`] during verification, so tokens
//! minted with `"ADMIN"` and `"admin"` resolve identically.
//!
//! Expiry is checked by `jsonwebtoken` against the system clock, with the
//! configured leeway.

use crate::config::{AuthConfig, ConfigError};
use crate::identity::{
    domain::{AuthContext, Role, UserId},
    ports::{AuthenticationError, CredentialVerifier},
};
use chrono::Duration;
use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode,
    errors::ErrorKind as JwtErrorKind,
};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Payload carried by a Lyceum credential.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the user identifier.
    pub sub: String,
    /// Role label, any casing.
    pub role: String,
    /// Issued at (Unix timestamp).
    pub iat: i64,
    /// Expiration time (Unix timestamp).
    pub exp: i64,
    /// Issuer, when configured.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iss: Option<String>,
}

/// Verifies HS256 bearer tokens.
#[derive(Clone)]
pub struct JwtCredentialVerifier {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl JwtCredentialVerifier {
    /// Creates a verifier from validated auth settings.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] when the secret is too short.
    pub fn new(config: &AuthConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = config.leeway_seconds;
        validation.set_required_spec_claims(&["exp", "sub"]);
        if let Some(issuer) = &config.issuer {
            validation.set_issuer(&[issuer]);
        }

        Ok(Self {
            decoding_key: DecodingKey::from_secret(config.secret.as_bytes()),
            validation,
        })
    }
}

impl CredentialVerifier for JwtCredentialVerifier {
    fn verify(&self, credential: &str) -> Result<AuthContext, AuthenticationError> {
        let token = extract_bearer_token(credential).ok_or(AuthenticationError::MissingCredential)?;

        let data = decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(
            |err| match err.kind() {
                JwtErrorKind::ExpiredSignature => AuthenticationError::Expired,
                _ => AuthenticationError::InvalidCredential(err.to_string()),
            },
        )?;

        let user_id = UserId::parse(&data.claims.sub)
            .map_err(|_| AuthenticationError::InvalidSubject(data.claims.sub.clone()))?;
        let role = Role::try_from(data.claims.role.as_str())
            .map_err(|err| AuthenticationError::UnknownRole(err.0))?;

        Ok(AuthContext::new(user_id, role))
    }
}

/// Signs credentials for the verifier above.
///
/// Login and password checks are owned by the external identity
/// collaborator; this type only mints the token once that collaborator has
/// accepted a user.
#[derive(Clone)]
pub struct TokenIssuer {
    encoding_key: EncodingKey,
    ttl: Duration,
    issuer: Option<String>,
}

/// Error returned when a credential cannot be issued.
#[derive(Debug, Error)]
pub enum TokenIssueError {
    /// Signing the claims failed.
    #[error("failed to sign credential: {0}")]
    Signing(#[from] jsonwebtoken::errors::Error),
    /// The expiry instant falls outside the representable date range.
    #[error("credential expiry overflows the supported date range")]
    ExpiryOverflow,
}

impl TokenIssuer {
    /// Creates an issuer from validated auth settings.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] when the secret is too short or
    /// the lifetime is out of range.
    pub fn new(config: &AuthConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let ttl = i64::try_from(config.token_ttl_seconds)
            .ok()
            .and_then(Duration::try_seconds)
            .ok_or_else(|| ConfigError::InvalidValue {
                field: "auth.token_ttl_seconds".to_owned(),
                reason: "exceeds the supported range".to_owned(),
            })?;

        Ok(Self {
            encoding_key: EncodingKey::from_secret(config.secret.as_bytes()),
            ttl,
            issuer: config.issuer.clone(),
        })
    }

    /// Issues a credential for the user, valid from the clock's current time.
    ///
    /// # Errors
    ///
    /// Returns [`TokenIssueError::ExpiryOverflow`] when the clock is so close
    /// to the end of the date range that the expiry cannot be represented,
    /// and [`TokenIssueError::Signing`] when signing fails.
    pub fn issue(
        &self,
        user_id: UserId,
        role: Role,
        clock: &impl Clock,
    ) -> Result<String, TokenIssueError> {
        let issued_at = clock.utc();
        let expires_at = issued_at
            .checked_add_signed(self.ttl)
            .ok_or(TokenIssueError::ExpiryOverflow)?;
        let claims = Claims {
            sub: user_id.to_string(),
            role: role.as_str().to_owned(),
            iat: issued_at.timestamp(),
            exp: expires_at.timestamp(),
            iss: self.issuer.clone(),
        };
        Ok(encode(&Header::default(), &claims, &self.encoding_key)?)
    }
}

/// Extracts the token from an `Authorization` header value.
///
/// Supports the `Bearer <token>` form and a bare token.
#[must_use]
pub fn extract_bearer_token(header: &str) -> Option<&str> {
    let trimmed = header.trim();
    let token = match trimmed.split_once(' ') {
        Some((scheme, rest)) if scheme.eq_ignore_ascii_case("bearer") => rest.trim(),
        Some(_) => return None,
        None if trimmed.eq_ignore_ascii_case("bearer") => return None,
        None => trimmed,
    };
    (!token.is_empty()).then_some(token)
}
