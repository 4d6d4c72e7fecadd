//! Application state and event routing.
//!
//! [`App`] is the single owner of all navigation state: the active tab, the
//! back/forward history, the breadcrumb trail, the command bar and the status
//! line. It receives every [`TuiEvent`] in arrival order and decides where the
//! event goes:
//!
//! 1. While the command bar has focus, keys belong to it (`enter` runs the
//!    command, `esc` discards it, `ctrl+c` quits).
//! 2. Otherwise global keys are checked first: `ctrl+c`, `:`, `[`, `]`,
//!    `tab` and `shift+tab`.
//! 3. Any other key goes to the active panel only.
//! 4. Lifecycle, breadcrumb and status events update router state.
//! 5. Resizes are stored, adjusted for the header and status rows and
//!    broadcast to every panel before [`App::update`] returns.
//! 6. Everything else is broadcast to every panel.
//!
//! The router never performs I/O. Work that has to happen later (timers,
//! creating the working directory) is returned as an [`Effect`] for the
//! runtime to carry out.
//!
//! # Example
//!
//! ```
//! use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
//! use helm_tui::config::Config;
//! use helm_tui::tui::app::App;
//! use helm_tui::tui::event::TuiEvent;
//! use helm_tui::tui::tabs::Tab;
//!
//! let mut app = App::new(Config::new("/tmp/helm-tui"));
//! let _ = app.update(TuiEvent::Key(KeyEvent::new(KeyCode::Tab, KeyModifiers::NONE)));
//! assert_eq!(app.tab(), Tab::Repositories);
//! ```

use crossterm::event::KeyEvent;
use ratatui::style::{Color, Modifier, Style};
use tracing::{debug, error, info, warn};

use crate::config::{ensure_working_dir, Config};
use crate::tui::command::{parse_command, CommandAction, CommandBar};
use crate::tui::event::{Effect, TuiEvent};
use crate::tui::history::{HistoryStack, ViewState};
use crate::tui::keys::{
    format_help, key_token, GLOBAL_KEYS, KEY_HISTORY_BACK, KEY_HISTORY_FORWARD, KEY_NEXT_TAB,
    KEY_PREV_TAB,
};
use crate::tui::panel::{default_panels, Component, ListPanel, Panel};
use crate::tui::status::StatusNotifier;
use crate::tui::tabs::{Direction, Tab};

/// Rows taken by the header and the status bar.
pub const CHROME_HEIGHT: u16 = 2;

/// Columns the command bar gives up for the prompt and cursor.
const COMMAND_BAR_MARGIN: u16 = 3;

/// Color theme for the TUI.
///
/// # NO_COLOR Support
///
/// [`Theme::from_env()`] returns [`Theme::monochrome()`] when the `NO_COLOR`
/// environment variable is set, following <https://no-color.org/>.
#[derive(Debug, Clone)]
pub struct Theme {
    /// Breadcrumb path in the header (default: magenta bold).
    pub header_path: Style,
    /// Active tab indicator (default: magenta bold).
    pub tab_active: Style,
    /// Inactive tab indicators (default: dark gray).
    pub tab_inactive: Style,
    /// Persistent status text (default: dark gray).
    pub status_text: Style,
    /// Flash message (default: green).
    pub flash: Style,
    /// Command prompt `:` (default: magenta bold).
    pub command_prompt: Style,
    /// Text cursor in the command bar.
    pub cursor: Style,
    /// Highlighted list entry (default: cyan bold).
    pub selected: Style,
    /// Titles (default: white bold).
    pub title: Style,
    /// Style for primary text (default: reset/terminal default).
    pub text_primary: Style,
    /// Style for muted/deemphasized text (default: dark gray).
    pub text_muted: Style,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            header_path: Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::BOLD),
            tab_active: Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::BOLD),
            tab_inactive: Style::default().fg(Color::DarkGray),
            status_text: Style::default().fg(Color::DarkGray),
            flash: Style::default().fg(Color::Green),
            command_prompt: Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::BOLD),
            cursor: Style::default().add_modifier(Modifier::REVERSED),
            selected: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            title: Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
            text_primary: Style::default(),
            text_muted: Style::default().fg(Color::DarkGray),
        }
    }
}

impl Theme {
    /// Creates a monochrome theme for `NO_COLOR` support.
    ///
    /// Only modifiers are used, no color codes.
    #[must_use]
    pub fn monochrome() -> Self {
        Self {
            header_path: Style::default().add_modifier(Modifier::BOLD),
            tab_active: Style::default().add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            tab_inactive: Style::default().add_modifier(Modifier::DIM),
            status_text: Style::default().add_modifier(Modifier::DIM),
            flash: Style::default().add_modifier(Modifier::BOLD),
            command_prompt: Style::default().add_modifier(Modifier::BOLD),
            cursor: Style::default().add_modifier(Modifier::REVERSED),
            selected: Style::default().add_modifier(Modifier::BOLD | Modifier::REVERSED),
            title: Style::default().add_modifier(Modifier::BOLD),
            text_primary: Style::default(),
            text_muted: Style::default().add_modifier(Modifier::DIM),
        }
    }

    /// Creates a theme based on the environment.
    ///
    /// Returns [`Theme::monochrome()`] if `NO_COLOR` is set (to any value),
    /// [`Theme::default()`] otherwise.
    #[must_use]
    pub fn from_env() -> Self {
        if std::env::var("NO_COLOR").is_ok() {
            Self::monochrome()
        } else {
            Self::default()
        }
    }
}

/// Symbol set for the TUI (unicode or ASCII).
///
/// # Example
///
/// ```
/// use helm_tui::tui::app::{ASCII_SYMBOLS, UNICODE_SYMBOLS};
///
/// assert_eq!(UNICODE_SYMBOLS.bullet, "•");
/// assert_eq!(ASCII_SYMBOLS.bullet, "*");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Symbols {
    /// Between the tab label and each breadcrumb.
    pub breadcrumb_separator: &'static str,
    /// Between tab indicators.
    pub tab_separator: &'static str,
    /// Between help entries.
    pub bullet: &'static str,
}

/// Unicode symbol set for modern terminals.
pub const UNICODE_SYMBOLS: Symbols = Symbols {
    breadcrumb_separator: " > ",
    tab_separator: " │ ",
    bullet: "•",
};

/// ASCII symbol set for maximum compatibility.
pub const ASCII_SYMBOLS: Symbols = Symbols {
    breadcrumb_separator: " > ",
    tab_separator: " | ",
    bullet: "*",
};

impl Symbols {
    /// Detects and returns the appropriate symbol set for the current terminal.
    ///
    /// Returns [`ASCII_SYMBOLS`] if `TERM` contains "linux" or "vt100",
    /// [`UNICODE_SYMBOLS`] otherwise.
    #[must_use]
    pub fn detect() -> Self {
        if std::env::var("TERM")
            .map(|t| t.contains("linux") || t.contains("vt100"))
            .unwrap_or(false)
        {
            ASCII_SYMBOLS
        } else {
            UNICODE_SYMBOLS
        }
    }
}

impl Default for Symbols {
    fn default() -> Self {
        Self::detect()
    }
}

/// The event router and everything it owns.
#[derive(Debug)]
pub struct App {
    config: Config,
    tab: Tab,
    /// One per tab, indexed by [`Tab::index`]. Never replaced.
    panels: Vec<Box<dyn Panel>>,
    history: HistoryStack,
    command_bar: CommandBar,
    width: u16,
    height: u16,
    breadcrumbs: Vec<String>,
    status: StatusNotifier,
    loaded: bool,
    should_quit: bool,
    fatal: Option<String>,
    theme: Theme,
    symbols: Symbols,
}

impl App {
    /// Creates the router with an empty [`ListPanel`] for every tab.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self::with_panels(config, default_panels())
    }

    /// Creates the router with the given panels.
    ///
    /// Each panel is placed at its own tab's slot. Tabs without a panel get
    /// an empty [`ListPanel`]; if two panels claim the same tab, the later
    /// one wins.
    #[must_use]
    pub fn with_panels(config: Config, panels: Vec<Box<dyn Panel>>) -> Self {
        let mut slots: Vec<Option<Box<dyn Panel>>> = (0..Tab::COUNT).map(|_| None).collect();
        for panel in panels {
            let index = panel.tab().index();
            slots[index] = Some(panel);
        }
        let panels = slots
            .into_iter()
            .enumerate()
            .map(|(i, slot)| {
                slot.unwrap_or_else(|| {
                    Box::new(ListPanel::new(Tab::from_index(i))) as Box<dyn Panel>
                })
            })
            .collect();

        let symbols = Symbols::detect();
        Self {
            tab: config.start_tab,
            config,
            panels,
            history: HistoryStack::new(),
            command_bar: CommandBar::new(),
            width: 0,
            height: 0,
            breadcrumbs: Vec::new(),
            status: StatusNotifier::new(default_status_text(&symbols)),
            loaded: false,
            should_quit: false,
            fatal: None,
            theme: Theme::from_env(),
            symbols,
        }
    }

    /// Replaces the theme.
    #[must_use]
    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    /// Replaces the symbol set and rebuilds the default status text.
    #[must_use]
    pub fn with_symbols(mut self, symbols: Symbols) -> Self {
        self.symbols = symbols;
        self.status.set_text(default_status_text(&symbols));
        self
    }

    /// Startup work: create the working directory, then run every panel's
    /// own initialisation.
    pub fn init(&mut self) -> Effect {
        let dir = self.config.working_dir.clone();
        let create_dir = Effect::perform(move || {
            TuiEvent::Init(ensure_working_dir(&dir).map_err(|e| e.to_string()))
        });

        let mut effects = vec![create_dir];
        effects.extend(self.panels.iter_mut().map(|panel| panel.init()));
        Effect::batch(effects)
    }

    /// Handles one event and returns the follow-up work.
    pub fn update(&mut self, event: TuiEvent) -> Effect {
        if self.fatal.is_some() {
            debug!(?event, "ignoring event after fatal startup failure");
            return Effect::None;
        }

        match event {
            TuiEvent::Key(key) => self.handle_key(key),
            TuiEvent::Init(Err(message)) => {
                error!(%message, "startup failed");
                self.fatal = Some(message);
                self.should_quit = true;
                Effect::Quit
            }
            TuiEvent::Init(Ok(path)) => {
                info!(working_dir = %path.display(), "startup complete");
                self.loaded = true;
                Effect::None
            }
            event @ TuiEvent::EditorFinished { .. } => {
                if self.active_panel().tab().hosts_editor() {
                    self.active_panel_mut().update(&event)
                } else {
                    warn!(tab = %self.tab, "dropping editor result for a tab without an editor");
                    Effect::None
                }
            }
            TuiEvent::Breadcrumbs(crumbs) => {
                self.breadcrumbs = crumbs;
                Effect::None
            }
            TuiEvent::StatusFlash(text) => self.status.flash(text),
            TuiEvent::ClearFlash => {
                self.status.clear_flash();
                Effect::None
            }
            TuiEvent::Resize(width, height) => {
                self.width = width;
                self.height = height;
                self.command_bar
                    .set_width(width.saturating_sub(COMMAND_BAR_MARGIN));
                let adjusted = height.saturating_sub(CHROME_HEIGHT);
                debug!(width, height, adjusted, "broadcasting resize");
                self.broadcast(&TuiEvent::Resize(width, adjusted))
            }
            other => self.broadcast(&other),
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> Effect {
        let token = key_token(&key);

        if self.command_bar.is_focused() {
            return match token.as_str() {
                "enter" => {
                    let input = self.command_bar.value();
                    self.command_bar.blur();
                    let effect = self.execute_command(&input);
                    self.command_bar.clear();
                    effect
                }
                "esc" => {
                    self.command_bar.blur();
                    self.command_bar.clear();
                    Effect::None
                }
                _ if GLOBAL_KEYS.quit.matches(&token) => self.quit(),
                _ => self.command_bar.update(&TuiEvent::Key(key)),
            };
        }

        if GLOBAL_KEYS.quit.matches(&token) {
            return self.quit();
        }
        if GLOBAL_KEYS.command.matches(&token) {
            self.command_bar.focus();
            self.command_bar.clear();
            return Effect::None;
        }

        match token.as_str() {
            KEY_HISTORY_FORWARD => {
                if let Some(state) = self.history.forward().cloned() {
                    self.restore(state);
                }
                Effect::None
            }
            KEY_HISTORY_BACK => {
                if let Some(state) = self.history.back().cloned() {
                    self.restore(state);
                }
                Effect::None
            }
            KEY_NEXT_TAB => self.advance(Direction::Forward),
            KEY_PREV_TAB => self.advance(Direction::Backward),
            _ => self.active_panel_mut().update(&TuiEvent::Key(key)),
        }
    }

    /// Moves one tab in `direction`, wrapping at either end.
    pub fn advance(&mut self, direction: Direction) -> Effect {
        let target = self.tab.step(direction);
        self.switch_to(target)
    }

    /// Makes `tab` active.
    pub fn jump_to(&mut self, tab: Tab) -> Effect {
        self.switch_to(tab)
    }

    /// Runs a command typed into the command bar. Unknown input does nothing.
    pub fn execute_command(&mut self, input: &str) -> Effect {
        match parse_command(input) {
            Some(CommandAction::Quit) => self.quit(),
            Some(CommandAction::Jump(tab)) => self.jump_to(tab),
            None => {
                debug!(input, "ignoring command");
                Effect::None
            }
        }
    }

    /// Records the current view, switches tab, clears the trail and resets
    /// the incoming panel.
    fn switch_to(&mut self, target: Tab) -> Effect {
        self.history
            .push(ViewState::new(self.tab, self.breadcrumbs.clone()));
        debug!(from = %self.tab, to = %target, "switching tab");
        self.tab = target;
        self.breadcrumbs.clear();
        self.active_panel_mut().update(&TuiEvent::ResetView)
    }

    fn restore(&mut self, state: ViewState) {
        debug!(tab = %state.tab, "restoring view from history");
        self.tab = state.tab;
        self.breadcrumbs = state.breadcrumbs;
    }

    fn quit(&mut self) -> Effect {
        info!("quit requested");
        self.should_quit = true;
        Effect::Quit
    }

    fn broadcast(&mut self, event: &TuiEvent) -> Effect {
        let effects: Vec<Effect> = self
            .panels
            .iter_mut()
            .map(|panel| panel.update(event))
            .collect();
        Effect::batch(effects)
    }

    pub fn tab(&self) -> Tab {
        self.tab
    }

    pub fn breadcrumbs(&self) -> &[String] {
        &self.breadcrumbs
    }

    pub fn history(&self) -> &HistoryStack {
        &self.history
    }

    pub fn command_bar(&self) -> &CommandBar {
        &self.command_bar
    }

    /// Whether keys currently go to the command bar.
    pub fn is_command_active(&self) -> bool {
        self.command_bar.is_focused()
    }

    pub fn status(&self) -> &StatusNotifier {
        &self.status
    }

    /// Full terminal size as last reported.
    pub fn size(&self) -> (u16, u16) {
        (self.width, self.height)
    }

    /// Whether startup has completed.
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Why startup failed, if it did.
    pub fn fatal(&self) -> Option<&str> {
        self.fatal.as_deref()
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    pub fn symbols(&self) -> &Symbols {
        &self.symbols
    }

    /// The panel backing `tab`.
    pub fn panel(&self, tab: Tab) -> &dyn Panel {
        self.panels[tab.index()].as_ref()
    }

    pub fn active_panel(&self) -> &dyn Panel {
        self.panel(self.tab)
    }

    fn active_panel_mut(&mut self) -> &mut Box<dyn Panel> {
        &mut self.panels[self.tab.index()]
    }
}

fn default_status_text(symbols: &Symbols) -> String {
    format_help(&GLOBAL_KEYS.short_help(), symbols.bullet)
}
