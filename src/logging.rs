//! Log subscriber setup.
//!
//! The terminal UI owns stdout and stderr while it runs, so log output is
//! appended to a file instead.

use std::fs::OpenOptions;
use std::sync::Mutex;

use anyhow::{Context, Result};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::{Config, ensure_log_directory};

/// Builds the log filter: `RUST_LOG` when set, otherwise `default_level`.
///
/// An unparsable `default_level` falls back to `info`.
pub fn build_filter(default_level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Installs the global tracing subscriber writing to `config.log_file`.
///
/// # Errors
///
/// Returns an error if the log file cannot be opened or a global subscriber
/// is already installed.
pub fn init_logging(config: &Config) -> Result<()> {
    ensure_log_directory(&config.log_file)?;

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&config.log_file)
        .with_context(|| format!("Failed to open log file: {}", config.log_file.display()))?;

    tracing_subscriber::registry()
        .with(build_filter(&config.log_level))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .with_target(false),
        )
        .try_init()
        .context("Failed to install log subscriber")?;

    Ok(())
}
