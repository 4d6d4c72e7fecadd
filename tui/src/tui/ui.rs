//! Frame composition.
//!
//! ```text
//! render() --> !loaded --> "loading..."
//!          --> header row
//!              active panel
//!              status bar row
//! ```

use ratatui::{
    layout::{Constraint, Layout},
    widgets::Paragraph,
    Frame,
};

use crate::tui::app::App;
use crate::tui::panel::Component;
use crate::tui::widgets::{HeaderWidget, StatusBarWidget, HEADER_HEIGHT, STATUS_BAR_HEIGHT};

/// Text shown until startup completes.
pub const LOADING_TEXT: &str = "loading...";

/// Draws the whole frame for `app`.
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();
    if !app.is_loaded() {
        frame.render_widget(Paragraph::new(LOADING_TEXT), area);
        return;
    }

    let [header, content, status] = Layout::vertical([
        Constraint::Length(HEADER_HEIGHT),
        Constraint::Min(0),
        Constraint::Length(STATUS_BAR_HEIGHT),
    ])
    .areas(area);

    frame.render_widget(
        HeaderWidget::new(app.tab(), app.breadcrumbs(), app.theme(), app.symbols()),
        header,
    );

    app.active_panel()
        .render(content, frame.buffer_mut(), app.theme());

    frame.render_widget(
        StatusBarWidget::new(
            app.command_bar(),
            app.status().flash_text(),
            app.status().text(),
            app.theme(),
        ),
        status,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use ratatui::{backend::TestBackend, Terminal};

    use crate::config::Config;
    use crate::tui::app::{ASCII_SYMBOLS, CHROME_HEIGHT};
    use crate::tui::event::TuiEvent;

    fn create_test_terminal(width: u16, height: u16) -> Terminal<TestBackend> {
        Terminal::new(TestBackend::new(width, height)).unwrap()
    }

    fn loaded_app() -> App {
        let mut app = App::new(Config::new("/tmp/x")).with_symbols(ASCII_SYMBOLS);
        let _ = app.update(TuiEvent::Init(Ok("/tmp/x".into())));
        app
    }

    fn line(terminal: &Terminal<TestBackend>, y: u16) -> String {
        let buf = terminal.backend().buffer();
        (0..buf.area.width).map(|x| buf[(x, y)].symbol()).collect()
    }

    #[test]
    fn shows_loading_until_initialised() {
        let mut terminal = create_test_terminal(40, 10);
        let app = App::new(Config::new("/tmp/x"));
        terminal.draw(|f| render(f, &app)).unwrap();

        assert!(line(&terminal, 0).starts_with(LOADING_TEXT));
    }

    #[test]
    fn loaded_frame_has_header_content_and_status() {
        let mut terminal = create_test_terminal(100, 10);
        let app = loaded_app();
        terminal.draw(|f| render(f, &app)).unwrap();

        assert!(line(&terminal, 0).starts_with("Releases"));
        assert!(line(&terminal, 0).contains("Releases | Repositories | Hub | Plugins"));
        assert!(line(&terminal, 1).contains("No releases found"));
        assert!(line(&terminal, 9).trim_end().ends_with("ctrl+c Quit"));
    }

    #[test]
    fn chrome_height_matches_widgets() {
        assert_eq!(HEADER_HEIGHT + STATUS_BAR_HEIGHT, CHROME_HEIGHT);
    }

    #[test]
    fn command_bar_replaces_flash() {
        let mut terminal = create_test_terminal(100, 5);
        let mut app = loaded_app();
        let _ = app.update(TuiEvent::Resize(100, 5));
        let _ = app.update(TuiEvent::StatusFlash("Saved".into()));
        terminal.draw(|f| render(f, &app)).unwrap();
        assert!(line(&terminal, 4).starts_with("Saved"));

        let _ = app.update(TuiEvent::Key(KeyEvent::new(KeyCode::Char(':'), KeyModifiers::NONE)));
        let _ = app.update(TuiEvent::Key(KeyEvent::new(KeyCode::Char('h'), KeyModifiers::NONE)));
        terminal.draw(|f| render(f, &app)).unwrap();
        assert!(line(&terminal, 4).starts_with(":h"));
        assert!(!line(&terminal, 4).contains("Saved"));
    }

    #[test]
    fn tiny_terminal_does_not_panic() {
        let mut terminal = create_test_terminal(3, 1);
        let app = loaded_app();
        terminal.draw(|f| render(f, &app)).unwrap();
    }
}
