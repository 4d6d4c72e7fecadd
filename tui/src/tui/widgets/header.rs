//! Header row: breadcrumb path on the left, tab indicators on the right.
//!
//! ```text
//! Releases > nginx                      Releases | Repositories | Hub | Plugins
//! ```
//!
//! When the row is too narrow for both, the tab indicators are dropped and
//! the path is truncated from the right.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use crate::tui::app::{Symbols, Theme};
use crate::tui::tabs::Tab;

/// Height of the header in rows.
pub const HEADER_HEIGHT: u16 = 1;

/// Breadcrumb path plus tab indicators.
#[derive(Debug)]
pub struct HeaderWidget<'a> {
    active: Tab,
    breadcrumbs: &'a [String],
    theme: &'a Theme,
    symbols: &'a Symbols,
}

impl<'a> HeaderWidget<'a> {
    #[must_use]
    pub fn new(
        active: Tab,
        breadcrumbs: &'a [String],
        theme: &'a Theme,
        symbols: &'a Symbols,
    ) -> Self {
        Self {
            active,
            breadcrumbs,
            theme,
            symbols,
        }
    }

    /// `"<Tab> > crumb > crumb"`.
    fn path(&self) -> String {
        std::iter::once(self.active.label())
            .chain(self.breadcrumbs.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(self.symbols.breadcrumb_separator)
    }

    fn tab_indicators(&self) -> Line<'a> {
        let mut spans = Vec::with_capacity(Tab::COUNT * 2);
        for (i, tab) in Tab::ALL.iter().enumerate() {
            if i > 0 {
                spans.push(Span::styled(self.symbols.tab_separator, self.theme.tab_inactive));
            }
            let style = if *tab == self.active {
                self.theme.tab_active
            } else {
                self.theme.tab_inactive
            };
            spans.push(Span::styled(tab.label(), style));
        }
        Line::from(spans)
    }
}

impl Widget for HeaderWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        let path = Line::from(Span::styled(self.path(), self.theme.header_path));
        let tabs = self.tab_indicators();
        let path_width = path.width();
        let tabs_width = tabs.width();

        Paragraph::new(path).render(area, buf);

        // indicators only when they fit beside the path with one space gap;
        // widths stay in usize since a crumb can be longer than u16::MAX
        if path_width + 1 + tabs_width <= usize::from(area.width) {
            // fits, so tabs_width < area.width
            let tabs_width = tabs_width as u16;
            let right = Rect {
                x: area.x + area.width - tabs_width,
                width: tabs_width,
                height: 1,
                ..area
            };
            Paragraph::new(tabs).render(right, buf);
        }
    }
}
