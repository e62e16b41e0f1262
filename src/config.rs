//! Runtime configuration for the client.
//!
//! Settings are resolved once at startup from command-line overrides, then
//! environment variables, then defaults. The resolved `Config` is passed
//! explicitly to the parts that need it.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::api::DEFAULT_BASE_URL;

/// Environment variable holding the backend base URL.
pub const API_URL_ENV: &str = "PAPERQA_API_URL";
/// Environment variable holding the log file path.
pub const LOG_FILE_ENV: &str = "PAPERQA_LOG_FILE";
/// Environment variable holding the default log filter.
pub const LOG_LEVEL_ENV: &str = "PAPERQA_LOG";

const DEFAULT_LOG_LEVEL: &str = "info";

/// Values supplied on the command line. `None` means "not given".
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub api_url: Option<String>,
    pub log_file: Option<PathBuf>,
    pub log_level: Option<String>,
}

/// Resolved client configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Base URL of the question-answering backend.
    pub api_url: String,
    /// File that receives log output while the terminal UI owns the screen.
    pub log_file: PathBuf,
    /// Default tracing filter, used when `RUST_LOG` is unset.
    pub log_level: String,
}

impl Config {
    /// Resolves the configuration.
    ///
    /// Each setting takes the first value found among: the override, its
    /// environment variable, the default. Empty environment values count
    /// as unset.
    ///
    /// # Errors
    ///
    /// Returns an error if no log file was given and the platform data
    /// directory cannot be determined.
    pub fn resolve(overrides: ConfigOverrides) -> Result<Self> {
        let api_url = overrides
            .api_url
            .or_else(|| env_value(API_URL_ENV))
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let log_file = match overrides
            .log_file
            .or_else(|| env_value(LOG_FILE_ENV).map(PathBuf::from))
        {
            Some(path) => path,
            None => default_log_path().context("Failed to determine log file path")?,
        };

        let log_level = overrides
            .log_level
            .or_else(|| env_value(LOG_LEVEL_ENV))
            .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string());

        Ok(Self {
            api_url,
            log_file,
            log_level,
        })
    }
}

/// Reads an environment variable, treating empty values as unset.
fn env_value(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|value| !value.trim().is_empty())
}

/// Gets the cross-platform log file path.
///
/// Returns the path as `{data_dir}/paperqa/paperqa.log` where `data_dir` is:
/// - Linux: `~/.local/share`
/// - macOS: `~/Library/Application Support`
/// - Windows: `C:\Users\<user>\AppData\Roaming`
///
/// # Errors
///
/// Returns an error if the data directory cannot be determined.
pub fn default_log_path() -> Result<PathBuf> {
    let data_dir =
        dirs::data_dir().ok_or_else(|| anyhow::anyhow!("Failed to determine data directory"))?;

    Ok(data_dir.join("paperqa").join("paperqa.log"))
}

/// Ensures the parent directory of the log file exists.
///
/// # Errors
///
/// Returns an error if directory creation fails.
pub fn ensure_log_directory(log_path: &Path) -> Result<()> {
    if let Some(parent) = log_path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create log directory: {}", parent.display()))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn clear_env() {
        unsafe {
            std::env::remove_var(API_URL_ENV);
            std::env::remove_var(LOG_FILE_ENV);
            std::env::remove_var(LOG_LEVEL_ENV);
        }
    }

    #[test]
    #[serial]
    fn defaults_apply_when_nothing_is_set() {
        clear_env();

        let config = Config::resolve(ConfigOverrides {
            log_file: Some(PathBuf::from("/tmp/paperqa-test.log")),
            ..Default::default()
        })
        .unwrap();

        assert_eq!(config.api_url, "http://localhost:8000");
        assert_eq!(config.log_level, "info");
    }

    #[test]
    #[serial]
    fn environment_overrides_defaults() {
        clear_env();
        unsafe {
            std::env::set_var(API_URL_ENV, "http://papers.example:9000");
            std::env::set_var(LOG_FILE_ENV, "/tmp/from-env.log");
            std::env::set_var(LOG_LEVEL_ENV, "debug");
        }

        let config = Config::resolve(ConfigOverrides::default()).unwrap();
        assert_eq!(config.api_url, "http://papers.example:9000");
        assert_eq!(config.log_file, PathBuf::from("/tmp/from-env.log"));
        assert_eq!(config.log_level, "debug");

        clear_env();
    }

    #[test]
    #[serial]
    fn command_line_overrides_environment() {
        clear_env();
        unsafe {
            std::env::set_var(API_URL_ENV, "http://env-host:8000");
        }

        let config = Config::resolve(ConfigOverrides {
            api_url: Some("http://flag-host:8000".to_string()),
            log_file: Some(PathBuf::from("/tmp/flag.log")),
            log_level: Some("warn".to_string()),
        })
        .unwrap();

        assert_eq!(config.api_url, "http://flag-host:8000");
        assert_eq!(config.log_file, PathBuf::from("/tmp/flag.log"));
        assert_eq!(config.log_level, "warn");

        clear_env();
    }

    #[test]
    #[serial]
    fn empty_environment_value_counts_as_unset() {
        clear_env();
        unsafe {
            std::env::set_var(API_URL_ENV, "  ");
        }

        let config = Config::resolve(ConfigOverrides {
            log_file: Some(PathBuf::from("/tmp/paperqa-test.log")),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(config.api_url, DEFAULT_BASE_URL);

        clear_env();
    }

    #[test]
    fn default_log_path_ends_with_app_directory() {
        if let Ok(path) = default_log_path() {
            assert!(path.ends_with("paperqa/paperqa.log"));
        }
    }

    #[test]
    fn ensure_log_directory_creates_missing_parents() {
        let dir = tempfile::tempdir().unwrap();
        let log_path = dir.path().join("nested").join("deeper").join("paperqa.log");

        ensure_log_directory(&log_path).unwrap();
        assert!(log_path.parent().unwrap().is_dir());

        // Second call is a no-op
        ensure_log_directory(&log_path).unwrap();
    }
}
