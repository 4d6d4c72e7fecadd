//! Terminal user interface.
//!
//! # Architecture
//!
//! - **App** (`app`): router state and dispatch, theme and symbols
//! - **Event** (`event`): message taxonomy, effects, terminal polling
//! - **Runtime** (`runtime`): the single-threaded loop that executes effects
//! - **Navigation** (`tabs`, `history`, `command`, `status`): the pieces the
//!   router owns
//! - **Panels** (`panel`): the per-tab components
//! - **UI** (`ui`, `widgets`): frame layout and chrome
//! - **Terminal** (`terminal`): raw mode and panic-safe restoration
//!
//! # Usage
//!
//! ```ignore
//! use helm_tui::tui::{App, Runtime, Tui};
//!
//! let mut tui = Tui::new()?;
//! let mut app = App::new(config);
//! Runtime::new()
//!     .run(&mut app, |app| tui.draw(|f| helm_tui::tui::ui::render(f, app)))
//!     .await?;
//! ```

pub mod app;
pub mod command;
pub mod event;
pub mod history;
pub mod keys;
pub mod panel;
pub mod runtime;
pub mod status;
pub mod tabs;
pub mod terminal;
pub mod ui;
pub mod widgets;

pub use app::{App, Symbols, Theme};
pub use event::{Effect, EventHandler, TuiEvent};
pub use panel::{Component, ListPanel, Panel};
pub use runtime::Runtime;
pub use tabs::{Direction, Tab};
pub use terminal::{install_panic_hook, Tui};
