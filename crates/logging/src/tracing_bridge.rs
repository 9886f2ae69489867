//! crates/logging/src/tracing_bridge.rs
//! Subscriber installation for binaries and tests.
//!
//! Library crates in the workspace only emit events; installing a subscriber
//! is left to the binary. `RUST_LOG`, when set, takes precedence over the
//! verbosity derived from the command line.

use super::config::VerbosityConfig;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;
use tracing_subscriber::util::TryInitError;

/// Builds the filter for `config`, honouring `RUST_LOG` when present.
#[must_use]
pub fn env_filter(config: &VerbosityConfig) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(config.directives()))
}

/// Installs a global fmt subscriber writing to standard error.
///
/// Fails if a global subscriber is already installed.
pub fn init_tracing(config: &VerbosityConfig) -> Result<(), TryInitError> {
    tracing_subscriber::registry()
        .with(env_filter(config))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true),
        )
        .try_init()
}
