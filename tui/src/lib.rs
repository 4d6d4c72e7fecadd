//! helm-tui - terminal browser for Helm.
//!
//! This crate provides the navigation and event-routing core of a multi-tab
//! terminal application: which tab is active, a bounded back/forward
//! history, a small command language typed after `:`, and transient status
//! messages.
//!
//! # Overview
//!
//! Every input (key presses, resizes, timers, startup results) becomes a
//! [`TuiEvent`](tui::event::TuiEvent) handled by [`App`](tui::app::App), one
//! at a time. Handlers return [`Effect`](tui::event::Effect)s describing
//! follow-up work, which the [`Runtime`](tui::runtime::Runtime) carries out.
//!
//! # Modules
//!
//! - [`config`]: Configuration from environment variables and CLI flags
//! - [`error`]: Error types
//! - [`tui`]: Event routing, panels, rendering and the event loop

pub mod config;
pub mod error;
pub mod tui;

pub use config::{Config, ConfigError};
pub use error::{AppError, TuiError};
pub use tui::app::App;
pub use tui::runtime::Runtime;
