//! Key tokens and keymaps.
//!
//! Crossterm reports keys as structured [`KeyEvent`]s. The router and the
//! panels match on short token strings instead (`"ctrl+c"`, `"shift+tab"`,
//! `"["`), which keeps keymaps declarative and easy to display in help text.
//!
//! # Token format
//!
//! | Key | Token |
//! |-----|-------|
//! | printable character | the character itself (`"a"`, `":"`, `"?"`) |
//! | Ctrl + character | `"ctrl+<char>"` |
//! | Alt + character | `"alt+<char>"` |
//! | Tab / Shift+Tab | `"tab"` / `"shift+tab"` |
//! | Enter, Esc, Backspace, Delete | `"enter"`, `"esc"`, `"backspace"`, `"delete"` |
//! | arrows, Home, End | `"up"`, `"down"`, `"left"`, `"right"`, `"home"`, `"end"` |
//! | F-keys | `"f1"` .. `"f12"` |

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Converts a key event to its token string.
///
/// Returns an empty string for keys that have no token (media keys, bare
/// modifier presses and similar).
///
/// # Example
///
/// ```
/// use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
/// use helm_tui::tui::keys::key_token;
///
/// let key = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
/// assert_eq!(key_token(&key), "ctrl+c");
///
/// let key = KeyEvent::new(KeyCode::BackTab, KeyModifiers::SHIFT);
/// assert_eq!(key_token(&key), "shift+tab");
/// ```
#[must_use]
pub fn key_token(key: &KeyEvent) -> String {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let alt = key.modifiers.contains(KeyModifiers::ALT);

    match key.code {
        KeyCode::Char(c) if ctrl => format!("ctrl+{}", c.to_ascii_lowercase()),
        KeyCode::Char(c) if alt => format!("alt+{c}"),
        KeyCode::Char(c) => c.to_string(),
        KeyCode::Tab if key.modifiers.contains(KeyModifiers::SHIFT) => "shift+tab".to_string(),
        KeyCode::Tab => "tab".to_string(),
        KeyCode::BackTab => "shift+tab".to_string(),
        KeyCode::Enter => "enter".to_string(),
        KeyCode::Esc => "esc".to_string(),
        KeyCode::Backspace => "backspace".to_string(),
        KeyCode::Delete => "delete".to_string(),
        KeyCode::Up => "up".to_string(),
        KeyCode::Down => "down".to_string(),
        KeyCode::Left => "left".to_string(),
        KeyCode::Right => "right".to_string(),
        KeyCode::Home => "home".to_string(),
        KeyCode::End => "end".to_string(),
        KeyCode::PageUp => "pgup".to_string(),
        KeyCode::PageDown => "pgdown".to_string(),
        KeyCode::F(n) => format!("f{n}"),
        _ => String::new(),
    }
}

/// A named set of keys with help text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyBinding {
    /// Tokens that trigger this binding.
    pub keys: &'static [&'static str],
    /// Short key description shown in help (e.g. `"tab/S-tab"`).
    pub help_key: &'static str,
    /// What the binding does.
    pub help_desc: &'static str,
}

impl KeyBinding {
    /// Returns `true` if `token` triggers this binding.
    #[must_use]
    pub fn matches(&self, token: &str) -> bool {
        self.keys.contains(&token)
    }
}

/// Keys handled by the router before anything reaches a panel.
#[derive(Debug, Clone, Copy)]
pub struct GlobalKeys {
    pub tab_nav: KeyBinding,
    pub history_nav: KeyBinding,
    pub command: KeyBinding,
    pub help: KeyBinding,
    pub quit: KeyBinding,
}

impl GlobalKeys {
    /// Bindings shown in the one-line help, in display order.
    #[must_use]
    pub fn short_help(&self) -> [KeyBinding; 5] {
        [
            self.tab_nav,
            self.command,
            self.history_nav,
            self.help,
            self.quit,
        ]
    }
}

/// Global keymap.
pub const GLOBAL_KEYS: GlobalKeys = GlobalKeys {
    tab_nav: KeyBinding {
        keys: &["tab", "shift+tab"],
        help_key: "tab/S-tab",
        help_desc: "Next/prev tab",
    },
    history_nav: KeyBinding {
        keys: &["[", "]"],
        help_key: "[/]",
        help_desc: "History back/fwd",
    },
    command: KeyBinding {
        keys: &[":"],
        help_key: ":",
        help_desc: "Command",
    },
    help: KeyBinding {
        keys: &["?"],
        help_key: "?",
        help_desc: "Help",
    },
    quit: KeyBinding {
        keys: &["ctrl+c"],
        help_key: "ctrl+c",
        help_desc: "Quit",
    },
};

/// Next tab.
pub const KEY_NEXT_TAB: &str = "tab";
/// Previous tab.
pub const KEY_PREV_TAB: &str = "shift+tab";
/// History back.
pub const KEY_HISTORY_BACK: &str = "[";
/// History forward.
pub const KEY_HISTORY_FORWARD: &str = "]";

/// Keys the command bar uses for its suggestion list.
#[derive(Debug, Clone, Copy)]
pub struct SuggestionKeys {
    pub accept: KeyBinding,
    pub next: KeyBinding,
    pub prev: KeyBinding,
}

/// Suggestion keymap for the command bar.
pub const SUGGESTION_KEYS: SuggestionKeys = SuggestionKeys {
    accept: KeyBinding {
        keys: &["tab"],
        help_key: "tab",
        help_desc: "Accept suggestion",
    },
    next: KeyBinding {
        keys: &["down", "ctrl+n"],
        help_key: "down/ctrl+n",
        help_desc: "Next suggestion",
    },
    prev: KeyBinding {
        keys: &["up", "ctrl+p"],
        help_key: "up/ctrl+p",
        help_desc: "Previous suggestion",
    },
};

/// Renders bindings as `"key desc • key desc"`.
#[must_use]
pub fn format_help(bindings: &[KeyBinding], bullet: &str) -> String {
    bindings
        .iter()
        .map(|b| format!("{} {}", b.help_key, b.help_desc))
        .collect::<Vec<_>>()
        .join(&format!(" {bullet} "))
}
