//! Child panel capability set.
//!
//! The router addresses every tab through the [`Panel`] trait and never looks
//! at a concrete panel type. The only tag it inspects is [`Panel::tab`], used
//! to decide whether an editor-finished event applies to the active panel.
//!
//! [`ListPanel`] is the panel used for every tab: a selectable list with a
//! detail sub-view. Entering the detail view publishes a breadcrumb; leaving
//! it clears the trail again.

use std::fmt::Debug;

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Paragraph, Widget, Wrap},
};

use crate::tui::app::Theme;
use crate::tui::event::{Effect, TuiEvent};
use crate::tui::keys::key_token;
use crate::tui::tabs::Tab;

/// Something that consumes events and draws itself.
///
/// Implemented by every tab panel and, narrowly, by the command bar.
pub trait Component {
    /// Follow-up work to run once at startup.
    fn init(&mut self) -> Effect {
        Effect::None
    }

    /// Handles one event and returns any follow-up work.
    fn update(&mut self, event: &TuiEvent) -> Effect;

    /// Draws the component into `area`.
    fn render(&self, area: Rect, buf: &mut Buffer, theme: &Theme);
}

/// A component that backs one tab.
pub trait Panel: Component + Debug {
    /// The tab this panel belongs to.
    fn tab(&self) -> Tab;
}

/// Sub-view of a [`ListPanel`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    List,
    Detail,
}

/// Selectable list with a single-item detail view.
#[derive(Debug, Clone)]
pub struct ListPanel {
    tab: Tab,
    items: Vec<String>,
    selected: usize,
    view: View,
    width: u16,
    height: u16,
}

impl ListPanel {
    /// Creates an empty panel for `tab`.
    #[must_use]
    pub fn new(tab: Tab) -> Self {
        Self::with_items(tab, Vec::new())
    }

    /// Creates a panel for `tab` listing `items`.
    #[must_use]
    pub fn with_items(tab: Tab, items: Vec<String>) -> Self {
        Self {
            tab,
            items,
            selected: 0,
            view: View::List,
            width: 0,
            height: 0,
        }
    }

    /// Items in display order.
    pub fn items(&self) -> &[String] {
        &self.items
    }

    /// Index of the highlighted item.
    pub fn selected(&self) -> usize {
        self.selected
    }

    /// The highlighted item, if the list is not empty.
    pub fn selected_item(&self) -> Option<&str> {
        self.items.get(self.selected).map(String::as_str)
    }

    /// Current sub-view.
    pub fn view(&self) -> View {
        self.view
    }

    /// Size last received through a resize event, chrome already removed.
    pub fn size(&self) -> (u16, u16) {
        (self.width, self.height)
    }

    fn empty_message(&self) -> String {
        format!("No {} found", self.tab.label().to_lowercase())
    }

    fn handle_key(&mut self, token: &str) -> Effect {
        match (self.view, token) {
            (View::List, "up" | "k") => {
                self.selected = self.selected.saturating_sub(1);
                Effect::None
            }
            (View::List, "down" | "j") => {
                if self.selected + 1 < self.items.len() {
                    self.selected += 1;
                }
                Effect::None
            }
            (View::List, "enter") => match self.selected_item().map(str::to_string) {
                Some(crumb) => {
                    self.view = View::Detail;
                    Effect::Emit(TuiEvent::Breadcrumbs(vec![crumb]))
                }
                None => Effect::None,
            },
            (View::Detail, "esc" | "backspace") => {
                self.view = View::List;
                Effect::Emit(TuiEvent::Breadcrumbs(Vec::new()))
            }
            _ => Effect::None,
        }
    }
}

impl Component for ListPanel {
    fn update(&mut self, event: &TuiEvent) -> Effect {
        match event {
            TuiEvent::Key(key) => self.handle_key(&key_token(key)),
            TuiEvent::Resize(width, height) => {
                self.width = *width;
                self.height = *height;
                Effect::None
            }
            TuiEvent::ResetView => {
                self.view = View::List;
                self.selected = 0;
                Effect::None
            }
            TuiEvent::EditorFinished { error } => {
                let text = match error {
                    Some(message) => format!("Editor failed: {message}"),
                    None => "Changes applied".to_string(),
                };
                Effect::Emit(TuiEvent::StatusFlash(text))
            }
            _ => Effect::None,
        }
    }

    fn render(&self, area: Rect, buf: &mut Buffer, theme: &Theme) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        let lines: Vec<Line> = match self.view {
            View::List if self.items.is_empty() => {
                vec![Line::from(Span::styled(self.empty_message(), theme.text_muted))]
            }
            View::List => self
                .items
                .iter()
                .enumerate()
                .map(|(i, item)| {
                    if i == self.selected {
                        Line::from(Span::styled(format!("> {item}"), theme.selected))
                    } else {
                        Line::from(Span::styled(format!("  {item}"), theme.text_primary))
                    }
                })
                .collect(),
            View::Detail => {
                let item = self.selected_item().unwrap_or_default();
                vec![
                    Line::from(Span::styled(item.to_string(), theme.title)),
                    Line::from(Span::styled("esc to go back", theme.text_muted)),
                ]
            }
        };

        // keep the selection on screen
        let visible = area.height as usize;
        let skip = match self.view {
            View::List if self.selected >= visible => self.selected + 1 - visible,
            _ => 0,
        };
        let lines: Vec<Line> = lines.into_iter().skip(skip).collect();

        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .render(area, buf);
    }
}

impl Panel for ListPanel {
    fn tab(&self) -> Tab {
        self.tab
    }
}

/// One empty [`ListPanel`] per tab, indexed by [`Tab::index`].
#[must_use]
pub fn default_panels() -> Vec<Box<dyn Panel>> {
    Tab::ALL
        .iter()
        .map(|tab| Box::new(ListPanel::new(*tab)) as Box<dyn Panel>)
        .collect()
}
