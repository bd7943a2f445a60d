//! Logging setup for the `cardvault` binary.

use crate::error::{Result, TokenizeError};
use tracing_subscriber::EnvFilter;

/// Maps the `-v` count to a default level; `RUST_LOG` overrides it.
pub fn level_for(verbose: u8) -> tracing::Level {
    match verbose {
        0 => tracing::Level::INFO,
        1 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    }
}

/// Initializes structured logging on stderr so stdout stays reserved for output.
pub fn init_logging(verbose: u8) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level_for(verbose).as_str()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|e| TokenizeError::internal(format!("Failed to initialize logging: {}", e)))
}
