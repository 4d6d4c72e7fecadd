//! Status bar: command input or flash on the left, persistent status on the
//! right.
//!
//! ```text
//! :hub                          tab/S-tab Next/prev tab • : Command • ...
//! Saved                         tab/S-tab Next/prev tab • : Command • ...
//! ```
//!
//! The left side wins when space runs out: the persistent status is only
//! drawn in whatever is left after the command bar or flash.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use crate::tui::app::Theme;
use crate::tui::command::CommandBar;
use crate::tui::panel::Component;

/// Height of the status bar in rows.
pub const STATUS_BAR_HEIGHT: u16 = 1;

/// Command prompt shown before the command bar input.
const PROMPT: &str = ":";

#[derive(Debug)]
pub struct StatusBarWidget<'a> {
    command_bar: &'a CommandBar,
    flash: Option<&'a str>,
    status: &'a str,
    theme: &'a Theme,
}

impl<'a> StatusBarWidget<'a> {
    #[must_use]
    pub fn new(
        command_bar: &'a CommandBar,
        flash: Option<&'a str>,
        status: &'a str,
        theme: &'a Theme,
    ) -> Self {
        Self {
            command_bar,
            flash,
            status,
            theme,
        }
    }

    /// Columns the left side needs.
    fn left_width(&self) -> usize {
        if self.command_bar.is_focused() {
            // prompt plus the bar's own width, at least room for the cursor
            PROMPT.len() + usize::from(self.command_bar.width().max(1))
        } else {
            self.flash.map_or(0, |f| Line::raw(f).width())
        }
    }
}

impl Widget for StatusBarWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        let area = Rect { height: 1, ..area };
        // clamped to the row, so it fits in u16
        let left_width = self.left_width().min(usize::from(area.width)) as u16;

        if self.command_bar.is_focused() {
            Paragraph::new(Span::styled(PROMPT, self.theme.command_prompt)).render(area, buf);
            let input = Rect {
                x: area.x + 1,
                width: left_width.saturating_sub(1),
                ..area
            };
            self.command_bar.render(input, buf, self.theme);
        } else if let Some(flash) = self.flash {
            Paragraph::new(Span::styled(flash, self.theme.flash)).render(area, buf);
        }

        let status_width = Line::raw(self.status).width();
        let free = usize::from(area.width - left_width);
        if status_width > 0 && status_width < free {
            let status_width = status_width as u16;
            let right = Rect {
                x: area.x + area.width - status_width,
                width: status_width,
                ..area
            };
            Paragraph::new(Line::from(Span::styled(self.status, self.theme.status_text)))
                .render(right, buf);
        }
    }
}
