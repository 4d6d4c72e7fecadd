//! Terminal setup and RAII restoration.
//!
//! [`Tui`] puts the terminal into raw mode on the alternate screen and puts
//! it back on drop. [`install_panic_hook`] does the same restoration before a
//! panic message is printed, so the message lands in the normal screen.
//!
//! ```ignore
//! use helm_tui::tui::{install_panic_hook, Tui};
//!
//! install_panic_hook();
//! let mut tui = Tui::new()?;
//! tui.draw(|frame| { /* render */ })?;
//! // restored when `tui` goes out of scope
//! ```

use std::io::{self, Stdout};
use std::panic;

use crossterm::{
    cursor::{Hide, Show},
    execute,
    terminal::{
        disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
    },
};
use ratatui::{backend::CrosstermBackend, Terminal};

use crate::error::TuiError;

/// Leaves the alternate screen and raw mode, ignoring failures.
fn reset_terminal() {
    let _ = execute!(io::stdout(), Show, LeaveAlternateScreen);
    let _ = disable_raw_mode();
}

/// Installs a panic hook that restores terminal state before the previous
/// hook prints the panic message.
///
/// Call once at startup, before creating a [`Tui`]. Calling it again chains
/// another hook.
pub fn install_panic_hook() {
    let previous_hook = panic::take_hook();

    panic::set_hook(Box::new(move |panic_info| {
        reset_terminal();
        previous_hook(panic_info);
    }));
}

/// Terminal in raw mode on the alternate screen.
///
/// Dropping it shows the cursor, leaves the alternate screen and disables
/// raw mode. Errors during drop are ignored.
pub struct Tui {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    restored: bool,
}

impl Tui {
    /// Enters raw mode and the alternate screen and hides the cursor.
    ///
    /// # Errors
    ///
    /// Returns [`TuiError::TerminalInit`] if any step fails. Steps that
    /// already succeeded are undone first.
    pub fn new() -> Result<Self, TuiError> {
        enable_raw_mode().map_err(TuiError::TerminalInit)?;

        let mut stdout = io::stdout();
        if let Err(e) = execute!(stdout, EnterAlternateScreen, Hide) {
            let _ = disable_raw_mode();
            return Err(TuiError::TerminalInit(e));
        }

        let terminal = Terminal::new(CrosstermBackend::new(stdout)).map_err(|e| {
            reset_terminal();
            TuiError::TerminalInit(e)
        })?;

        Ok(Self {
            terminal,
            restored: false,
        })
    }

    /// Draws one frame.
    ///
    /// # Errors
    ///
    /// Returns [`TuiError::Render`] if the frame cannot be flushed.
    pub fn draw<F>(&mut self, f: F) -> Result<(), TuiError>
    where
        F: FnOnce(&mut ratatui::Frame),
    {
        self.terminal.draw(f).map_err(TuiError::Render)?;
        Ok(())
    }

    /// Current terminal size as (columns, rows).
    ///
    /// # Errors
    ///
    /// Returns [`TuiError::TerminalInit`] if the size cannot be queried.
    pub fn size(&self) -> Result<(u16, u16), TuiError> {
        let size = self.terminal.size().map_err(TuiError::TerminalInit)?;
        Ok((size.width, size.height))
    }

    /// Restores the terminal now instead of on drop.
    ///
    /// # Errors
    ///
    /// Unlike drop, failures are returned.
    pub fn restore(&mut self) -> io::Result<()> {
        if self.restored {
            return Ok(());
        }
        self.restored = true;

        execute!(io::stdout(), Show, LeaveAlternateScreen)?;
        disable_raw_mode()?;
        Ok(())
    }
}

impl Drop for Tui {
    fn drop(&mut self) {
        if !self.restored {
            reset_terminal();
        }
    }
}
