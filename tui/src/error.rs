//! Error types for helm-tui.
//!
//! This module defines the error types used throughout the crate, providing
//! structured error handling with clear, human-readable messages.
//!
//! Only startup can fail fatally. Everything the navigation controller does
//! afterwards (unknown commands, exhausted history, misdirected events)
//! degrades to a no-op and never surfaces an error value.

use std::path::PathBuf;

use thiserror::Error;

/// Startup failures.
///
/// Configuration problems are reported as
/// [`ConfigError`](crate::config::ConfigError) before the UI starts; these
/// are the failures that happen once it is running.
///
/// # Examples
///
/// ```
/// use helm_tui::config::ensure_working_dir;
/// use helm_tui::error::AppError;
///
/// let temp = std::env::temp_dir().join("helm-tui-doc");
/// let dir: Result<_, AppError> = ensure_working_dir(&temp);
/// assert!(dir.is_ok());
/// ```
#[derive(Error, Debug)]
pub enum AppError {
    /// The working directory could not be created.
    #[error("failed to create working directory {}: {source}", path.display())]
    WorkingDir {
        /// Directory that was being created.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// Startup failed inside the event loop and the application terminated.
    #[error("fatal: {0}")]
    Fatal(String),
}

/// Errors that can occur during TUI operation.
#[derive(Error, Debug)]
pub enum TuiError {
    /// Terminal initialization failed.
    #[error("failed to initialize terminal: {0}")]
    TerminalInit(#[source] std::io::Error),

    /// Terminal rendering failed.
    #[error("render error: {0}")]
    Render(#[source] std::io::Error),
}
