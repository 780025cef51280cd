//! Layered configuration for Lyceum components.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`LYCEUM_*` prefix, `__` as separator)
//! 2. An optional TOML file supplied by the host
//! 3. Built-in defaults
//!
//! `LYCEUM_AUTH__SECRET` maps to `auth.secret`,
//! `LYCEUM_LEDGER__EXAM_RESUBMISSION` to `ledger.exam_resubmission`, and so
//! on. The loaded value is handed to each component at construction; nothing
//! reads configuration from a process-wide location afterwards.

use crate::ledger::domain::ResubmissionPolicy;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Root configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LyceumConfig {
    /// Credential verification settings.
    #[serde(default)]
    pub auth: AuthConfig,
    /// Submission ledger settings.
    #[serde(default)]
    pub ledger: LedgerConfig,
}

impl LyceumConfig {
    /// Loads configuration from defaults, the optional TOML file, and the
    /// environment, then validates it.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when extraction fails or a value is invalid.
    pub fn load(file: Option<&Path>) -> Result<Self, ConfigError> {
        let config: Self = Self::figment(file).extract().map_err(Box::new)?;
        config.auth.validate()?;
        Ok(config)
    }

    /// Builds the figment provider chain.
    ///
    /// Public so tests can add providers on top.
    #[must_use]
    pub fn figment(file: Option<&Path>) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));
        if let Some(path) = file {
            figment = figment.merge(Toml::file(path));
        }
        figment.merge(Env::prefixed("LYCEUM_").split("__"))
    }
}

/// Settings for bearer credential verification and issuance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Shared HMAC secret.
    #[serde(default)]
    pub secret: String,
    /// Clock skew tolerated when checking expiry, in seconds.
    #[serde(default)]
    pub leeway_seconds: u64,
    /// Expected `iss` claim, if any.
    #[serde(default)]
    pub issuer: Option<String>,
    /// Lifetime of issued credentials, in seconds.
    #[serde(default = "default_token_ttl")]
    pub token_ttl_seconds: u64,
}

impl AuthConfig {
    /// Minimum accepted secret length in bytes.
    pub const MIN_SECRET_LEN: usize = 32;

    /// Longest accepted credential lifetime: ten years of seconds.
    pub const MAX_TOKEN_TTL_SECONDS: u64 = 315_360_000;

    /// Creates settings with the given secret and defaults for the rest.
    #[must_use]
    pub fn with_secret(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            ..Self::default()
        }
    }

    /// Checks that the secret is long enough to sign credentials and that
    /// the credential lifetime is within range.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] for a short or empty secret, or
    /// for a lifetime of zero or above [`Self::MAX_TOKEN_TTL_SECONDS`].
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.secret.len() < Self::MIN_SECRET_LEN {
            return Err(ConfigError::InvalidValue {
                field: "auth.secret".to_owned(),
                reason: format!("must be at least {} bytes", Self::MIN_SECRET_LEN),
            });
        }
        if !(1..=Self::MAX_TOKEN_TTL_SECONDS).contains(&self.token_ttl_seconds) {
            return Err(ConfigError::InvalidValue {
                field: "auth.token_ttl_seconds".to_owned(),
                reason: format!(
                    "must be between 1 and {} seconds",
                    Self::MAX_TOKEN_TTL_SECONDS
                ),
            });
        }
        Ok(())
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            secret: String::new(),
            leeway_seconds: 0,
            issuer: None,
            token_ttl_seconds: default_token_ttl(),
        }
    }
}

const fn default_token_ttl() -> u64 {
    86_400
}

/// Settings for the submission ledger.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerConfig {
    /// What happens when a student submits the same assignment again.
    #[serde(default)]
    pub assignment_resubmission: ResubmissionPolicy,
    /// What happens when a student submits the same exam again.
    #[serde(default)]
    pub exam_resubmission: ResubmissionPolicy,
}

/// Configuration loading errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Figment extraction or merge error.
    #[error("configuration error: {0}")]
    Figment(#[from] Box<figment::Error>),

    /// A configuration field has an invalid value.
    #[error("invalid configuration value for '{field}': {reason}")]
    InvalidValue {
        /// Dotted path of the offending field.
        field: String,
        /// Why the value was rejected.
        reason: String,
    },
}
