//! Widgets for the chrome around the active panel.
//!
//! - [`header`]: breadcrumb path and tab indicators
//! - [`status_bar`]: command input, flash and persistent status
//!
//! Widgets are stateless; they borrow what they draw from the
//! [`App`](crate::tui::app::App).

pub mod header;
pub mod status_bar;

pub use header::{HeaderWidget, HEADER_HEIGHT};
pub use status_bar::{StatusBarWidget, STATUS_BAR_HEIGHT};
