//! Persistent status text and auto-expiring flash messages.

use std::time::Duration;

use crate::tui::event::{Effect, TuiEvent};

/// How long a flash stays visible.
pub const FLASH_DURATION: Duration = Duration::from_secs(3);

/// Status bar contents owned by the router.
///
/// Clearing is not tied to the flash that armed it: a second flash set within
/// [`FLASH_DURATION`] of the first disappears when the first one's timer
/// fires.
#[derive(Debug, Clone, Default)]
pub struct StatusNotifier {
    text: String,
    flash: Option<String>,
}

impl StatusNotifier {
    /// Creates a notifier showing `text` as the persistent status.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            flash: None,
        }
    }

    /// Persistent status text.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    /// Current flash message, if any.
    pub fn flash_text(&self) -> Option<&str> {
        self.flash.as_deref()
    }

    /// Shows `text` and returns the timer that will clear it.
    #[must_use = "the returned effect schedules the clear"]
    pub fn flash(&mut self, text: impl Into<String>) -> Effect {
        self.flash = Some(text.into());
        Effect::After(FLASH_DURATION, TuiEvent::ClearFlash)
    }

    /// Clears the flash, whichever message it holds.
    pub fn clear_flash(&mut self) {
        self.flash = None;
    }
}
