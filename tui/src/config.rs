//! Configuration module for helm-tui.
//!
//! This module handles parsing configuration from environment variables.
//! Command-line flags parsed in `main` override individual values through
//! [`Config::apply_overrides`].
//!
//! # Environment Variables
//!
//! | Variable | Required | Default | Description |
//! |----------|----------|---------|-------------|
//! | `HELM_TUI_DIR` | No | `~/.helm-tui` | Working directory, created at startup |
//! | `HELM_TUI_START_TAB` | No | `releases` | Initial tab, any command alias |
//! | `HELM_TUI_TICK_MS` | No | 250 | Tick interval in milliseconds |
//! | `HELM_TUI_LOG` | No | `info` | Log filter directive (falls back to `RUST_LOG`) |
//!
//! # Example
//!
//! ```no_run
//! use helm_tui::config::Config;
//!
//! let config = Config::from_env().expect("Failed to load configuration");
//! println!("Working directory: {}", config.working_dir.display());
//! ```

use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::BaseDirs;
use thiserror::Error;

use crate::error::AppError;
use crate::tui::command::resolve_alias;
use crate::tui::tabs::Tab;

/// Default working directory name relative to home.
const DEFAULT_WORKING_DIR: &str = ".helm-tui";

/// Default tick interval in milliseconds.
const DEFAULT_TICK_MS: u64 = 250;

/// Default log filter.
const DEFAULT_LOG_FILTER: &str = "info";

/// Log file name inside the working directory.
pub const LOG_FILE_NAME: &str = "helm-tui.log";

/// Errors that can occur during configuration parsing.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Environment variable has an invalid value.
    #[error("invalid value for {key}: {message}")]
    InvalidValue { key: String, message: String },

    /// Failed to determine home directory.
    #[error("failed to determine home directory")]
    NoHomeDirectory,
}

/// Configuration for helm-tui.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Directory created at startup; holds the log file.
    pub working_dir: PathBuf,

    /// Tab shown first.
    pub start_tab: Tab,

    /// Interval between tick events.
    pub tick_rate: Duration,

    /// `tracing` filter directive.
    pub log_filter: String,
}

impl Config {
    /// Creates a configuration rooted at `working_dir` with default values.
    #[must_use]
    pub fn new(working_dir: impl Into<PathBuf>) -> Self {
        Self {
            working_dir: working_dir.into(),
            start_tab: Tab::default(),
            tick_rate: Duration::from_millis(DEFAULT_TICK_MS),
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }

    /// Creates a new `Config` by parsing environment variables.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if:
    /// - `HELM_TUI_DIR` is unset and the home directory cannot be determined
    /// - `HELM_TUI_START_TAB` is not a known tab alias
    /// - `HELM_TUI_TICK_MS` is not a positive integer
    pub fn from_env() -> Result<Self, ConfigError> {
        // Optional: HELM_TUI_DIR (default: ~/.helm-tui)
        let working_dir = match env::var("HELM_TUI_DIR") {
            Ok(dir) if !dir.trim().is_empty() => PathBuf::from(dir),
            _ => BaseDirs::new()
                .ok_or(ConfigError::NoHomeDirectory)?
                .home_dir()
                .join(DEFAULT_WORKING_DIR),
        };

        // Optional: HELM_TUI_START_TAB (default: releases)
        let start_tab = match env::var("HELM_TUI_START_TAB") {
            Ok(val) => parse_tab("HELM_TUI_START_TAB", &val)?,
            Err(_) => Tab::default(),
        };

        // Optional: HELM_TUI_TICK_MS (default: 250, must be > 0)
        let tick_rate = match env::var("HELM_TUI_TICK_MS") {
            Ok(val) => parse_tick_ms("HELM_TUI_TICK_MS", &val)?,
            Err(_) => Duration::from_millis(DEFAULT_TICK_MS),
        };

        // Optional: HELM_TUI_LOG, then RUST_LOG (default: info)
        let log_filter = env::var("HELM_TUI_LOG")
            .or_else(|_| env::var("RUST_LOG"))
            .unwrap_or_else(|_| DEFAULT_LOG_FILTER.to_string());

        Ok(Self {
            working_dir,
            start_tab,
            tick_rate,
            log_filter,
        })
    }

    /// Applies command-line overrides on top of the environment values.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if `tab` is not a known alias or `tick_ms`
    /// is zero.
    pub fn apply_overrides(
        mut self,
        dir: Option<PathBuf>,
        tab: Option<&str>,
        tick_ms: Option<u64>,
    ) -> Result<Self, ConfigError> {
        if let Some(dir) = dir {
            self.working_dir = dir;
        }
        if let Some(tab) = tab {
            self.start_tab = parse_tab("--tab", tab)?;
        }
        if let Some(ms) = tick_ms {
            self.tick_rate = parse_tick_ms("--tick-ms", &ms.to_string())?;
        }
        Ok(self)
    }

    /// Path of the log file inside the working directory.
    #[must_use]
    pub fn log_file(&self) -> PathBuf {
        self.working_dir.join(LOG_FILE_NAME)
    }
}

/// Creates `path` and any missing parents.
///
/// # Errors
///
/// Returns [`AppError::WorkingDir`] if the directory cannot be created.
pub fn ensure_working_dir(path: &Path) -> Result<PathBuf, AppError> {
    fs::create_dir_all(path).map_err(|source| AppError::WorkingDir {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(path.to_path_buf())
}

fn parse_tab(key: &str, value: &str) -> Result<Tab, ConfigError> {
    resolve_alias(&value.trim().to_lowercase()).ok_or_else(|| ConfigError::InvalidValue {
        key: key.to_string(),
        message: format!("unknown tab '{value}'"),
    })
}

fn parse_tick_ms(key: &str, value: &str) -> Result<Duration, ConfigError> {
    let ms = value
        .trim()
        .parse::<u64>()
        .map_err(|_| ConfigError::InvalidValue {
            key: key.to_string(),
            message: format!("expected positive integer, got '{value}'"),
        })?;
    if ms == 0 {
        return Err(ConfigError::InvalidValue {
            key: key.to_string(),
            message: "tick interval must be greater than 0".to_string(),
        });
    }
    Ok(Duration::from_millis(ms))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::env;
    use tempfile::TempDir;

    /// Helper to run tests with isolated environment variables.
    /// Clears all HELM_TUI_* vars and RUST_LOG before the test and restores
    /// them after.
    fn with_clean_env<F, R>(f: F) -> R
    where
        F: FnOnce() -> R,
    {
        let saved_vars: Vec<(String, String)> = env::vars()
            .filter(|(k, _)| k.starts_with("HELM_TUI_") || k == "RUST_LOG")
            .collect();

        for (key, _) in &saved_vars {
            env::remove_var(key);
        }

        let result = f();

        for (key, _) in env::vars().filter(|(k, _)| k.starts_with("HELM_TUI_")) {
            env::remove_var(key);
        }
        env::remove_var("RUST_LOG");
        for (key, value) in saved_vars {
            env::set_var(key, value);
        }

        result
    }

    #[test]
    #[serial]
    fn test_defaults() {
        with_clean_env(|| {
            env::set_var("HELM_TUI_DIR", "/tmp/helm-tui-test");
            let config = Config::from_env().unwrap();

            assert_eq!(config.working_dir, PathBuf::from("/tmp/helm-tui-test"));
            assert_eq!(config.start_tab, Tab::Releases);
            assert_eq!(config.tick_rate, Duration::from_millis(DEFAULT_TICK_MS));
            assert_eq!(config.log_filter, "info");
        });
    }

    #[test]
    #[serial]
    fn test_default_working_dir_is_under_home() {
        with_clean_env(|| {
            if let Some(base) = BaseDirs::new() {
                let config = Config::from_env().unwrap();
                assert_eq!(config.working_dir, base.home_dir().join(".helm-tui"));
            }
        });
    }

    #[test]
    #[serial]
    fn test_full_config() {
        with_clean_env(|| {
            env::set_var("HELM_TUI_DIR", "/custom/dir");
            env::set_var("HELM_TUI_START_TAB", "  Plug ");
            env::set_var("HELM_TUI_TICK_MS", "100");
            env::set_var("HELM_TUI_LOG", "helm_tui=debug");

            let config = Config::from_env().unwrap();
            assert_eq!(config.working_dir, PathBuf::from("/custom/dir"));
            assert_eq!(config.start_tab, Tab::Plugins);
            assert_eq!(config.tick_rate, Duration::from_millis(100));
            assert_eq!(config.log_filter, "helm_tui=debug");
        });
    }

    #[test]
    #[serial]
    fn test_rust_log_fallback() {
        with_clean_env(|| {
            env::set_var("HELM_TUI_DIR", "/tmp/x");
            env::set_var("RUST_LOG", "warn");
            assert_eq!(Config::from_env().unwrap().log_filter, "warn");

            env::set_var("HELM_TUI_LOG", "trace");
            assert_eq!(Config::from_env().unwrap().log_filter, "trace");
        });
    }

    #[test]
    #[serial]
    fn test_unknown_start_tab_rejected() {
        with_clean_env(|| {
            env::set_var("HELM_TUI_DIR", "/tmp/x");
            env::set_var("HELM_TUI_START_TAB", "charts");

            let err = Config::from_env().unwrap_err();
            assert!(matches!(err, ConfigError::InvalidValue { ref key, .. } if key == "HELM_TUI_START_TAB"));
            assert!(err.to_string().contains("charts"));
        });
    }

    #[test]
    #[serial]
    fn test_invalid_tick_ms() {
        with_clean_env(|| {
            env::set_var("HELM_TUI_DIR", "/tmp/x");
            env::set_var("HELM_TUI_TICK_MS", "fast");

            let err = Config::from_env().unwrap_err();
            assert!(matches!(err, ConfigError::InvalidValue { ref key, .. } if key == "HELM_TUI_TICK_MS"));
        });
    }

    #[test]
    #[serial]
    fn test_zero_tick_ms_rejected() {
        with_clean_env(|| {
            env::set_var("HELM_TUI_DIR", "/tmp/x");
            env::set_var("HELM_TUI_TICK_MS", "0");

            let err = Config::from_env().unwrap_err();
            assert!(err.to_string().contains("greater than 0"));
        });
    }

    #[test]
    fn test_overrides_win() {
        let config = Config::new("/from/env")
            .apply_overrides(Some(PathBuf::from("/from/cli")), Some("hub"), Some(50))
            .unwrap();

        assert_eq!(config.working_dir, PathBuf::from("/from/cli"));
        assert_eq!(config.start_tab, Tab::Hub);
        assert_eq!(config.tick_rate, Duration::from_millis(50));
    }

    #[test]
    fn test_absent_overrides_keep_values() {
        let base = Config::new("/from/env");
        let config = base.clone().apply_overrides(None, None, None).unwrap();
        assert_eq!(config, base);
    }

    #[test]
    fn test_invalid_overrides_rejected() {
        assert!(Config::new("/x").apply_overrides(None, Some("nope"), None).is_err());
        assert!(Config::new("/x").apply_overrides(None, None, Some(0)).is_err());
    }

    #[test]
    fn test_log_file_is_inside_working_dir() {
        let config = Config::new("/data/helm");
        assert_eq!(config.log_file(), PathBuf::from("/data/helm/helm-tui.log"));
    }

    #[test]
    fn test_ensure_working_dir_creates_nested_dirs() {
        let temp = TempDir::new().unwrap();
        let target = temp.path().join("a").join("b");

        let created = ensure_working_dir(&target).unwrap();
        assert_eq!(created, target);
        assert!(target.is_dir());

        // idempotent
        assert!(ensure_working_dir(&target).is_ok());
    }

    #[test]
    fn test_ensure_working_dir_fails_under_a_file() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("file");
        std::fs::write(&file, b"x").unwrap();

        let err = ensure_working_dir(&file.join("sub")).unwrap_err();
        assert!(matches!(err, AppError::WorkingDir { .. }));
    }
}
