//! Tracing subscriber setup
//!
//! `RUST_LOG` wins over the configured filter when it is set.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::errors::{Result, UnitsError};

/// Build the filter: `RUST_LOG` if present, otherwise `fallback`
pub fn env_filter(fallback: &str) -> Result<EnvFilter> {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => EnvFilter::try_new(fallback)
            .map_err(|e| UnitsError::Config(format!("Invalid log filter '{}': {}", fallback, e))),
    }
}

/// Install the global subscriber (stderr, compact fmt layer)
///
/// Returns an error if a subscriber is already installed.
pub fn init_tracing(fallback: &str) -> Result<()> {
    let filter = env_filter(fallback)?;
    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_writer(std::io::stderr),
        )
        .try_init()
        .map_err(|e| UnitsError::Config(format!("Failed to initialise tracing: {}", e)))
}
