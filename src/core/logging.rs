//! Log subscriber setup
//!
//! One global `tracing` subscriber for the process. `RUST_LOG` wins over the configured
//! level so a single run can be made verbose without touching the settings file. Output
//! goes to stderr to keep the console board on stdout readable.

use super::error::{CoreError, CoreResult};
use tracing_subscriber::EnvFilter;

/// Install the global subscriber
///
/// # Errors
///
/// [`CoreError::Logging`] when the level is not a valid filter or a subscriber is
/// already installed.
pub fn init_logging(default_level: &str) -> CoreResult<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(default_level).map_err(|e| CoreError::Logging {
            message: format!("bad log level '{default_level}': {e}"),
        })?,
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| CoreError::Logging {
            message: e.to_string(),
        })
}
