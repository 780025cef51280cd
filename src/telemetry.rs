//! Structured logging bootstrap.
//!
//! Services emit `tracing` events; nothing is printed until a host process
//! installs a subscriber. [`init_tracing`] installs a formatted subscriber
//! filtered by the `LYCEUM_LOG` environment variable, falling back to the
//! directive the caller passes.

use thiserror::Error;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Environment variable holding the log filter directive.
pub const LOG_ENV_VAR: &str = "LYCEUM_LOG";

/// Errors raised while installing the subscriber.
#[derive(Debug, Error)]
pub enum TelemetryError {
    /// The fallback directive does not parse.
    #[error("invalid log filter directive '{directive}': {source}")]
    InvalidDirective {
        /// Directive as given.
        directive: String,
        /// Parser failure.
        #[source]
        source: tracing_subscriber::filter::ParseError,
    },
    /// Installing the global subscriber failed.
    #[error("failed to initialize tracing subscriber: {0}")]
    Install(#[from] tracing_subscriber::util::TryInitError),
}

/// Builds the filter from `LYCEUM_LOG`, or from `default_directive` when the
/// variable is unset or unparsable.
///
/// # Errors
///
/// Returns [`TelemetryError::InvalidDirective`] when the fallback is used and
/// does not parse.
pub fn env_filter(default_directive: &str) -> Result<EnvFilter, TelemetryError> {
    EnvFilter::try_from_env(LOG_ENV_VAR).or_else(|_| {
        EnvFilter::try_new(default_directive).map_err(|source| TelemetryError::InvalidDirective {
            directive: default_directive.to_owned(),
            source,
        })
    })
}

/// Installs the global subscriber. Returns `false` without touching the
/// existing one when a subscriber is already installed.
///
/// # Errors
///
/// Returns [`TelemetryError`] when the directive is invalid or installation
/// fails.
pub fn init_tracing(default_directive: &str) -> Result<bool, TelemetryError> {
    let filter = env_filter(default_directive)?;
    if tracing::dispatcher::has_been_set() {
        return Ok(false);
    }
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .try_init()?;
    Ok(true)
}
