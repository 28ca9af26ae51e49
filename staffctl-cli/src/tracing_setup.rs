//! Tracing setup for the staffctl CLI
//!
//! Logs go to stderr so they never interleave with tables on stdout.
//!
//! Usage:
//!   staffctl --debug                   # Debug logging to console
//!   RUST_LOG=staffctl_core=debug staffctl  # Fine-grained log control
//!
//! Environment variables:
//!   RUST_LOG                           # Log filter (default: warn)

use anyhow::{anyhow, Result};
use tracing_subscriber::EnvFilter;

/// Tracing configuration options
#[derive(Debug, Clone, Default)]
pub struct TracingConfig {
    /// Enable debug logging (sets RUST_LOG=debug if not already set)
    pub debug: bool,
}

impl TracingConfig {
    fn default_directive(&self) -> &'static str {
        if self.debug {
            "debug"
        } else {
            "warn"
        }
    }
}

/// Initialize the console subscriber
pub fn init(config: &TracingConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.default_directive()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(config.debug) // Show targets in debug mode
        .with_writer(std::io::stderr)
        .compact()
        .try_init()
        .map_err(|err| anyhow!(err))
}
