//! Command mini-language and the command bar text input.
//!
//! Commands are typed after pressing `:`. Input is trimmed and lower-cased
//! before lookup, so `"  ReLeAsEs "` and `"rel"` name the same tab. Anything
//! that is neither a quit literal nor a tab alias is ignored without feedback.
//!
//! | Input | Action |
//! |-------|--------|
//! | `q`, `quit` | quit |
//! | `releases`, `rel` | jump to Releases |
//! | `repos`, `repo`, `repositories` | jump to Repositories |
//! | `hub` | jump to Hub |
//! | `plugins`, `plug` | jump to Plugins |

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use crossterm::event::{KeyCode, KeyModifiers};

use crate::tui::app::Theme;
use crate::tui::event::{Effect, TuiEvent};
use crate::tui::keys::{key_token, SUGGESTION_KEYS};
use crate::tui::panel::Component;
use crate::tui::tabs::Tab;

/// Alias to tab lookup table. Many aliases may name the same tab.
pub const COMMAND_ALIASES: &[(&str, Tab)] = &[
    ("releases", Tab::Releases),
    ("rel", Tab::Releases),
    ("repos", Tab::Repositories),
    ("repo", Tab::Repositories),
    ("repositories", Tab::Repositories),
    ("hub", Tab::Hub),
    ("plugins", Tab::Plugins),
    ("plug", Tab::Plugins),
];

/// Literals that quit the application.
pub const QUIT_COMMANDS: &[&str] = &["q", "quit"];

/// Completions offered while typing.
pub const COMMAND_NAMES: &[&str] = &["releases", "repos", "hub", "plugins", "quit"];

/// Maximum number of characters the command bar accepts.
pub const COMMAND_CHAR_LIMIT: usize = 64;

/// Text shown in an empty command bar.
pub const COMMAND_PLACEHOLDER: &str = "type a command...";

/// What a command asks the application to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandAction {
    Quit,
    Jump(Tab),
}

/// Resolves an already normalised alias to its tab.
#[must_use]
pub fn resolve_alias(alias: &str) -> Option<Tab> {
    COMMAND_ALIASES
        .iter()
        .find(|(name, _)| *name == alias)
        .map(|(_, tab)| *tab)
}

/// Parses raw command bar input.
///
/// Returns `None` for empty or unrecognised input.
///
/// # Example
///
/// ```
/// use helm_tui::tui::command::{parse_command, CommandAction};
/// use helm_tui::tui::tabs::Tab;
///
/// assert_eq!(parse_command("  ReLeAsEs "), Some(CommandAction::Jump(Tab::Releases)));
/// assert_eq!(parse_command("q"), Some(CommandAction::Quit));
/// assert_eq!(parse_command("bogus"), None);
/// ```
#[must_use]
pub fn parse_command(input: &str) -> Option<CommandAction> {
    let input = input.trim().to_lowercase();
    if input.is_empty() {
        return None;
    }
    if QUIT_COMMANDS.contains(&input.as_str()) {
        return Some(CommandAction::Quit);
    }
    resolve_alias(&input).map(CommandAction::Jump)
}

/// Single-line text input with prefix suggestions.
///
/// The cursor is a character index into the buffer, not a byte offset.
#[derive(Debug, Clone, Default)]
pub struct CommandBar {
    input: Vec<char>,
    cursor: usize,
    width: u16,
    focused: bool,
    suggestion: usize,
}

impl CommandBar {
    /// Creates an empty, unfocused command bar.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current buffer contents.
    pub fn value(&self) -> String {
        self.input.iter().collect()
    }

    /// Replaces the buffer, truncated to [`COMMAND_CHAR_LIMIT`], and moves the
    /// cursor to the end.
    pub fn set_value(&mut self, value: &str) {
        self.input = value.chars().take(COMMAND_CHAR_LIMIT).collect();
        self.cursor = self.input.len();
        self.suggestion = 0;
    }

    pub fn clear(&mut self) {
        self.set_value("");
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn focus(&mut self) {
        self.focused = true;
    }

    pub fn blur(&mut self) {
        self.focused = false;
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn set_width(&mut self, width: u16) {
        self.width = width;
    }

    /// Command names starting with the current buffer. Empty when the buffer
    /// is empty.
    pub fn suggestions(&self) -> Vec<&'static str> {
        let value = self.value().to_lowercase();
        if value.is_empty() {
            return Vec::new();
        }
        COMMAND_NAMES
            .iter()
            .copied()
            .filter(|name| name.starts_with(&value))
            .collect()
    }

    /// The highlighted suggestion, if any.
    pub fn current_suggestion(&self) -> Option<&'static str> {
        let suggestions = self.suggestions();
        if suggestions.is_empty() {
            return None;
        }
        suggestions.get(self.suggestion % suggestions.len()).copied()
    }

    fn cycle_suggestion(&mut self, forward: bool) {
        let count = self.suggestions().len();
        if count == 0 {
            return;
        }
        self.suggestion = if forward {
            (self.suggestion + 1) % count
        } else {
            (self.suggestion + count - 1) % count
        };
    }

    fn insert(&mut self, c: char) {
        if self.input.len() >= COMMAND_CHAR_LIMIT {
            return;
        }
        self.input.insert(self.cursor, c);
        self.cursor += 1;
        self.suggestion = 0;
    }

    fn backspace(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            self.input.remove(self.cursor);
            self.suggestion = 0;
        }
    }

    fn delete(&mut self) {
        if self.cursor < self.input.len() {
            self.input.remove(self.cursor);
            self.suggestion = 0;
        }
    }
}

impl Component for CommandBar {
    fn update(&mut self, event: &TuiEvent) -> Effect {
        let TuiEvent::Key(key) = event else {
            return Effect::None;
        };
        let token = key_token(key);

        if SUGGESTION_KEYS.accept.matches(&token) {
            if let Some(suggestion) = self.current_suggestion() {
                self.set_value(suggestion);
            }
            return Effect::None;
        }
        if SUGGESTION_KEYS.next.matches(&token) {
            self.cycle_suggestion(true);
            return Effect::None;
        }
        if SUGGESTION_KEYS.prev.matches(&token) {
            self.cycle_suggestion(false);
            return Effect::None;
        }

        match token.as_str() {
            "ctrl+u" => self.clear(),
            "backspace" => self.backspace(),
            "delete" => self.delete(),
            "left" => self.cursor = self.cursor.saturating_sub(1),
            "right" => self.cursor = (self.cursor + 1).min(self.input.len()),
            "home" => self.cursor = 0,
            "end" => self.cursor = self.input.len(),
            _ => {
                let plain = !key
                    .modifiers
                    .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT);
                if let (KeyCode::Char(c), true) = (key.code, plain) {
                    self.insert(c);
                }
            }
        }
        Effect::None
    }

    fn render(&self, area: Rect, buf: &mut Buffer, theme: &Theme) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        let mut spans = Vec::new();
        if self.input.is_empty() {
            spans.push(Span::styled(" ", theme.cursor));
            spans.push(Span::styled(COMMAND_PLACEHOLDER, theme.text_muted));
        } else {
            let before: String = self.input[..self.cursor].iter().collect();
            let at: String = self
                .input
                .get(self.cursor)
                .map_or_else(|| " ".to_string(), char::to_string);
            let after: String = self
                .input
                .get(self.cursor + 1..)
                .map(|rest| rest.iter().collect())
                .unwrap_or_default();

            spans.push(Span::styled(before, theme.text_primary));
            spans.push(Span::styled(at, theme.cursor));
            spans.push(Span::styled(after, theme.text_primary));

            // ghost text completing the highlighted suggestion
            if self.cursor == self.input.len() {
                if let Some(suggestion) = self.current_suggestion() {
                    let typed = self.input.len();
                    let rest: String = suggestion.chars().skip(typed).collect();
                    spans.push(Span::styled(rest, theme.text_muted));
                }
            }
        }

        Paragraph::new(Line::from(spans)).render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEvent;

    fn key(code: KeyCode) -> TuiEvent {
        TuiEvent::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn ctrl(c: char) -> TuiEvent {
        TuiEvent::Key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL))
    }

    fn type_str(bar: &mut CommandBar, text: &str) {
        for c in text.chars() {
            bar.update(&key(KeyCode::Char(c)));
        }
    }

    #[test]
    fn releases_aliases_resolve_to_the_same_tab() {
        let expected = Some(CommandAction::Jump(Tab::Releases));
        assert_eq!(parse_command("  ReLeAsEs "), expected);
        assert_eq!(parse_command("rel"), expected);
        assert_eq!(parse_command("RELEASES"), expected);
    }

    #[test]
    fn every_alias_resolves() {
        assert_eq!(resolve_alias("repos"), Some(Tab::Repositories));
        assert_eq!(resolve_alias("repo"), Some(Tab::Repositories));
        assert_eq!(resolve_alias("repositories"), Some(Tab::Repositories));
        assert_eq!(resolve_alias("hub"), Some(Tab::Hub));
        assert_eq!(resolve_alias("plugins"), Some(Tab::Plugins));
        assert_eq!(resolve_alias("plug"), Some(Tab::Plugins));
    }

    #[test]
    fn quit_literals() {
        assert_eq!(parse_command("q"), Some(CommandAction::Quit));
        assert_eq!(parse_command(" QUIT "), Some(CommandAction::Quit));
    }

    #[test]
    fn empty_and_unknown_input_is_ignored() {
        assert_eq!(parse_command(""), None);
        assert_eq!(parse_command("   "), None);
        assert_eq!(parse_command("bogus"), None);
        assert_eq!(parse_command("release"), None);
    }

    #[test]
    fn resolve_alias_does_not_normalise() {
        assert_eq!(resolve_alias("REL"), None);
    }

    #[test]
    fn typing_inserts_at_cursor() {
        let mut bar = CommandBar::new();
        type_str(&mut bar, "hb");
        bar.update(&key(KeyCode::Left));
        type_str(&mut bar, "u");

        assert_eq!(bar.value(), "hub");
        assert_eq!(bar.cursor(), 2);
    }

    #[test]
    fn input_stops_at_char_limit() {
        let mut bar = CommandBar::new();
        type_str(&mut bar, &"x".repeat(COMMAND_CHAR_LIMIT + 10));
        assert_eq!(bar.value().chars().count(), COMMAND_CHAR_LIMIT);

        bar.set_value(&"y".repeat(100));
        assert_eq!(bar.value().chars().count(), COMMAND_CHAR_LIMIT);
    }

    #[test]
    fn backspace_delete_and_clear() {
        let mut bar = CommandBar::new();
        type_str(&mut bar, "repos");
        bar.update(&key(KeyCode::Backspace));
        assert_eq!(bar.value(), "repo");

        bar.update(&key(KeyCode::Home));
        bar.update(&key(KeyCode::Delete));
        assert_eq!(bar.value(), "epo");

        bar.update(&ctrl('u'));
        assert_eq!(bar.value(), "");
        assert_eq!(bar.cursor(), 0);
    }

    #[test]
    fn control_chords_do_not_insert() {
        let mut bar = CommandBar::new();
        bar.update(&ctrl('x'));
        assert_eq!(bar.value(), "");
    }

    #[test]
    fn suggestions_are_prefix_matches() {
        let mut bar = CommandBar::new();
        assert!(bar.suggestions().is_empty());

        type_str(&mut bar, "r");
        assert_eq!(bar.suggestions(), vec!["releases", "repos"]);
        assert_eq!(bar.current_suggestion(), Some("releases"));
    }

    #[test]
    fn suggestion_cycling_wraps() {
        let mut bar = CommandBar::new();
        type_str(&mut bar, "r");

        bar.update(&key(KeyCode::Down));
        assert_eq!(bar.current_suggestion(), Some("repos"));
        bar.update(&ctrl('n'));
        assert_eq!(bar.current_suggestion(), Some("releases"));
        bar.update(&key(KeyCode::Up));
        assert_eq!(bar.current_suggestion(), Some("repos"));
    }

    #[test]
    fn tab_accepts_current_suggestion() {
        let mut bar = CommandBar::new();
        type_str(&mut bar, "pl");
        bar.update(&key(KeyCode::Tab));

        assert_eq!(bar.value(), "plugins");
        assert_eq!(bar.cursor(), "plugins".len());
    }

    #[test]
    fn tab_without_suggestion_keeps_buffer() {
        let mut bar = CommandBar::new();
        type_str(&mut bar, "zz");
        bar.update(&key(KeyCode::Tab));
        assert_eq!(bar.value(), "zz");
    }

    #[test]
    fn focus_and_width() {
        let mut bar = CommandBar::new();
        assert!(!bar.is_focused());
        bar.focus();
        assert!(bar.is_focused());
        bar.blur();
        assert!(!bar.is_focused());

        bar.set_width(77);
        assert_eq!(bar.width(), 77);
    }

    #[test]
    fn render_shows_placeholder_when_empty() {
        let bar = CommandBar::new();
        let area = Rect::new(0, 0, 30, 1);
        let mut buf = Buffer::empty(area);
        bar.render(area, &mut buf, &Theme::default());

        let text: String = buf.content().iter().map(|c| c.symbol()).collect();
        assert!(text.contains(COMMAND_PLACEHOLDER));
    }

    #[test]
    fn render_shows_buffer_and_ghost_completion() {
        let mut bar = CommandBar::new();
        type_str(&mut bar, "hu");
        let area = Rect::new(0, 0, 30, 1);
        let mut buf = Buffer::empty(area);
        bar.render(area, &mut buf, &Theme::default());

        let text: String = buf.content().iter().map(|c| c.symbol()).collect();
        assert!(text.starts_with("hu b"));
    }
}
