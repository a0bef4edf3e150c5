//! Main application state and TUI event loop for the sales dashboard.
//!
//! [`App`] owns the theme, the dashboard state and the sidebar cursor. Key
//! presses are translated into [`DashboardState`] operations.

use std::io;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Frame, Terminal};

use sales_runtime::dashboard::DashboardState;

use crate::components::sidebar::{SidebarFocus, SidebarState};
use crate::dashboard_view;
use crate::themes::Theme;

/// How long to wait for a key press before redrawing.
const TICK_RATE: Duration = Duration::from_millis(250);

// ── App ───────────────────────────────────────────────────────────────────────

/// Root application state for the dashboard TUI.
pub struct App {
    /// Active colour theme.
    pub theme: Theme,
    pub state: DashboardState,
    pub sidebar: SidebarState,
    /// Set to `true` to break out of the event loop on the next iteration.
    pub should_quit: bool,
}

impl App {
    /// Construct a new application with the given theme name.
    pub fn new(theme_name: &str, state: DashboardState) -> Self {
        Self {
            theme: Theme::from_name(theme_name),
            state,
            sidebar: SidebarState::default(),
            should_quit: false,
        }
    }

    // ── Public event loop ─────────────────────────────────────────────────────

    /// Run the interactive dashboard until the user quits.
    ///
    /// Uses `crossterm::event::poll` with a 250 ms timeout so the loop stays
    /// responsive. Exits on `q`, `Q`, or `Ctrl+C`. The terminal is restored
    /// even when drawing fails.
    pub async fn run(mut self) -> io::Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let result = self.event_loop(&mut terminal);

        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        result
    }

    /// Apply one key press to the application state.
    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind == KeyEventKind::Release {
            return;
        }
        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true;
            }
            KeyCode::Char('q') | KeyCode::Char('Q') => self.should_quit = true,
            KeyCode::Tab | KeyCode::BackTab => self.sidebar.switch_focus(),
            KeyCode::Up | KeyCode::Char('k') => self.sidebar.cursor_up(),
            KeyCode::Down | KeyCode::Char('j') => {
                let len = self.focused_len();
                self.sidebar.cursor_down(len);
            }
            KeyCode::Char(' ') | KeyCode::Enter => self.activate_cursor(),
            KeyCode::Char('c') => self.state.clear_selection(),
            KeyCode::Char('r') => self.state.resample(),
            _ => {}
        }
    }

    // ── Private helpers ───────────────────────────────────────────────────────

    fn event_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    ) -> io::Result<()> {
        while !self.should_quit {
            terminal.draw(|frame| self.render(frame))?;

            if event::poll(TICK_RATE)? {
                if let Event::Key(key) = event::read()? {
                    self.handle_key(key);
                }
            }
        }
        Ok(())
    }

    /// Render the current application state into `frame`.
    fn render(&self, frame: &mut Frame) {
        let area = frame.area();
        dashboard_view::render_dashboard(frame, area, &self.state, &self.sidebar, &self.theme);
    }

    /// Rows in the focused sidebar control.
    fn focused_len(&self) -> usize {
        match self.sidebar.focus {
            SidebarFocus::Articles => self.state.dataset().articles().len(),
            SidebarFocus::Tickets => self.state.summary().top_tickets.len(),
        }
    }

    /// Toggle the article or pick the ticket under the cursor.
    fn activate_cursor(&mut self) {
        let cursor = self.sidebar.cursor();
        match self.sidebar.focus {
            SidebarFocus::Articles => {
                if let Some(article) = self.state.dataset().articles().get(cursor).cloned() {
                    tracing::debug!(%article, "toggling article");
                    self.state.toggle_article(&article);
                }
            }
            SidebarFocus::Tickets => {
                if let Some(ticket) = self
                    .state
                    .summary()
                    .top_tickets
                    .get(cursor)
                    .map(|t| t.ticket_number.clone())
                {
                    self.state.select_ticket(&ticket);
                }
            }
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use ratatui::backend::TestBackend;
    use sales_core::models::Record;
    use sales_data::dataset::Dataset;
    use sales_runtime::dashboard::DashboardConfig;
    use std::sync::Arc;

    fn make_app() -> App {
        let date = NaiveDate::from_ymd_opt(2021, 1, 2).unwrap();
        let records = vec![
            Record::new(date, None, "1", "BAGUETTE", 2.0, 1.20),
            Record::new(date, None, "1", "CROISSANT", 1.0, 1.10),
            Record::new(date, None, "2", "COOKIE", 1.0, 0.65),
        ];
        let config = DashboardConfig {
            seed: Some(3),
            initial_articles: vec!["BAGUETTE".to_string()],
            ..DashboardConfig::default()
        };
        let dataset = Arc::new(Dataset::from_records("sales.csv", records));
        let state = DashboardState::new(dataset, config);
        App::new("dark", state)
    }

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
    }

    // ── App::new ──────────────────────────────────────────────────────────────

    #[test]
    fn test_app_new() {
        let app = make_app();
        assert!(!app.should_quit);
        assert_eq!(app.sidebar, SidebarState::default());
    }

    // ── quitting ──────────────────────────────────────────────────────────────

    #[test]
    fn test_q_quits() {
        let mut app = make_app();
        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit);
    }

    #[test]
    fn test_ctrl_c_quits_without_clearing() {
        let mut app = make_app();
        app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(app.should_quit);
        assert_eq!(app.state.selection().len(), 1);
    }

    // ── selection keys ────────────────────────────────────────────────────────

    #[test]
    fn test_space_toggles_article_under_cursor() {
        let mut app = make_app();
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Char(' '));
        assert!(app.state.selection().contains("CROISSANT"));

        press(&mut app, KeyCode::Enter);
        assert!(!app.state.selection().contains("CROISSANT"));
    }

    #[test]
    fn test_c_clears_selection() {
        let mut app = make_app();
        press(&mut app, KeyCode::Char('c'));
        assert!(app.state.selection().is_empty());
        assert!(app.state.summary().empty_selection);
    }

    #[test]
    fn test_cursor_stops_at_last_article() {
        let mut app = make_app();
        for _ in 0..10 {
            press(&mut app, KeyCode::Down);
        }
        assert_eq!(app.sidebar.article_cursor, 2);
    }

    #[test]
    fn test_ticket_pick_leaves_totals_unchanged() {
        let mut app = make_app();
        let before = app.state.summary().filtered.clone();

        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.state.selected_ticket(), Some("2"));
        assert_eq!(app.state.summary().filtered, before);
    }

    #[test]
    fn test_release_events_are_ignored() {
        let mut app = make_app();
        let mut key = KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE);
        key.kind = KeyEventKind::Release;
        app.handle_key(key);
        assert!(!app.should_quit);
    }

    // ── rendering ─────────────────────────────────────────────────────────────

    #[test]
    fn test_render_on_test_backend() {
        let app = make_app();
        let mut terminal = Terminal::new(TestBackend::new(120, 40)).unwrap();
        terminal.draw(|frame| app.render(frame)).unwrap();
    }
}
