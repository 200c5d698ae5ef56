//! Demo application state and event loop

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Tabs},
    Frame, Terminal,
};
use tracing::debug;

use super::screens::{CustomersScreen, SignupScreen};
use crate::components::StatusDisplay;
use crate::config::Config;
use crate::traits::{Screen as _, ScreenAction};
use crate::ui::{centered_rect, Styles};

/// Demo screens
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Signup,
    Customers,
}

impl Screen {
    pub const ALL: [Screen; 2] = [Screen::Signup, Screen::Customers];

    pub fn title(&self) -> &'static str {
        match self {
            Screen::Signup => "Validated Input",
            Screen::Customers => "Data Table",
        }
    }

    pub fn next(&self) -> Screen {
        match self {
            Screen::Signup => Screen::Customers,
            Screen::Customers => Screen::Signup,
        }
    }

    fn index(&self) -> usize {
        match self {
            Screen::Signup => 0,
            Screen::Customers => 1,
        }
    }
}

pub struct App {
    pub current_screen: Screen,
    pub config: Config,
    signup: SignupScreen,
    customers: CustomersScreen,
    status: StatusDisplay,
    pub should_quit: bool,
    pub show_help_popup: bool,
}

impl App {
    pub fn new(config: Config) -> Result<Self> {
        let customers = CustomersScreen::new(&config)?;
        let mut status = StatusDisplay::new();
        status.info("Ready - Ctrl+T switches screens, F1 shows help");

        Ok(Self {
            current_screen: Screen::Signup,
            config,
            signup: SignupScreen::new(),
            customers,
            status,
            should_quit: false,
            show_help_popup: false,
        })
    }

    /// Run the main application loop
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        while !self.should_quit {
            terminal.draw(|f| self.draw(f))?;

            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    self.handle_key_event(key)?;
                }
            }
        }
        Ok(())
    }

    /// Global shortcuts first, then the active screen
    pub fn handle_key_event(&mut self, key: KeyEvent) -> Result<()> {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::F(1) => {
                self.show_help_popup = !self.show_help_popup;
                return Ok(());
            }
            KeyCode::Esc if self.show_help_popup => {
                self.show_help_popup = false;
                return Ok(());
            }
            KeyCode::Char('q') | KeyCode::Char('c') if ctrl => {
                self.should_quit = true;
                return Ok(());
            }
            KeyCode::Char('t') if ctrl => {
                self.switch_to(self.current_screen.next());
                return Ok(());
            }
            _ => {}
        }

        if self.show_help_popup {
            return Ok(());
        }

        let action = match self.current_screen {
            Screen::Signup => self.signup.handle_key_event(key)?,
            Screen::Customers => self.customers.handle_key_event(key)?,
        };
        self.apply(action);
        Ok(())
    }

    fn apply(&mut self, action: ScreenAction) {
        match action {
            ScreenAction::Quit => self.should_quit = true,
            ScreenAction::SetStatus(message) => self.status.success(message),
            ScreenAction::SetError(message) => self.status.error(message),
            ScreenAction::None => {}
        }
    }

    pub fn switch_to(&mut self, screen: Screen) {
        if screen != self.current_screen {
            debug!("Switching to {:?}", screen);
            self.current_screen = screen;
            self.status.clear();
        }
    }

    pub fn status(&self) -> &StatusDisplay {
        &self.status
    }

    pub fn draw(&mut self, f: &mut Frame) {
        let size = f.size();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(0),
                Constraint::Length(3),
            ])
            .split(size);

        self.draw_tabs(f, chunks[0]);
        match self.current_screen {
            Screen::Signup => self.signup.draw(f, chunks[1]),
            Screen::Customers => self.customers.draw(f, chunks[1]),
        }
        let hint = match self.current_screen {
            Screen::Signup => " F1: Help | Ctrl+T: Switch screen | Ctrl+Q: Quit ".to_string(),
            Screen::Customers => format!(" {} | F1: Help ", self.customers.key_hint()),
        };
        self.status.render(f, chunks[2], &hint);

        if self.show_help_popup {
            self.draw_help_popup(f, size);
        }
    }

    fn draw_tabs(&self, f: &mut Frame, area: Rect) {
        let titles: Vec<Line> = Screen::ALL
            .iter()
            .map(|s| Line::from(Span::raw(s.title())))
            .collect();
        let tabs = Tabs::new(titles)
            .block(
                Block::default()
                    .title(Span::styled("Uzence Component Demo", Styles::title()))
                    .borders(Borders::ALL),
            )
            .select(self.current_screen.index())
            .highlight_style(Styles::selected());
        f.render_widget(tabs, area);
    }

    fn draw_help_popup(&self, f: &mut Frame, area: Rect) {
        let popup_area = centered_rect(70, 70, area);
        f.render_widget(Clear, popup_area);

        let help_popup = Paragraph::new(self.help_content())
            .block(
                Block::default()
                    .title("Help - Context Shortcuts")
                    .borders(Borders::ALL)
                    .border_style(Styles::active_border()),
            )
            .style(Styles::default());
        f.render_widget(help_popup, popup_area);
    }

    fn help_content(&self) -> String {
        let global_help = "Global Shortcuts:\n\
            F1 - Toggle this help (Esc closes)\n\
            Ctrl+T - Switch screen\n\
            Ctrl+Q - Quit\n\n";
        let screen_help = match self.current_screen {
            Screen::Signup => self.signup.help_text(),
            Screen::Customers => self.customers.help_text(),
        };
        format!("{}{}", global_help, screen_help)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;
    use ratatui::backend::TestBackend;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    #[test]
    fn test_global_shortcuts() {
        let mut app = App::new(Config::default()).unwrap();
        app.handle_key_event(key(KeyCode::Char('t'), KeyModifiers::CONTROL)).unwrap();
        assert_eq!(app.current_screen, Screen::Customers);

        app.handle_key_event(key(KeyCode::F(1), KeyModifiers::NONE)).unwrap();
        assert!(app.show_help_popup);
        app.handle_key_event(key(KeyCode::Esc, KeyModifiers::NONE)).unwrap();
        assert!(!app.show_help_popup);

        app.handle_key_event(key(KeyCode::Char('q'), KeyModifiers::CONTROL)).unwrap();
        assert!(app.should_quit);
    }

    #[test]
    fn test_submit_empty_form_reports_error() {
        let mut app = App::new(Config::default()).unwrap();
        app.handle_key_event(key(KeyCode::Enter, KeyModifiers::NONE)).unwrap();
        let current = app.status().current().map(|m| m.text.clone());
        assert_eq!(current, Some("Please fix 4 field(s)".to_string()));
    }

    #[test]
    fn test_draws_both_screens() {
        let backend = TestBackend::new(120, 40);
        let mut terminal = Terminal::new(backend).unwrap();
        let mut app = App::new(Config::default()).unwrap();

        terminal.draw(|f| app.draw(f)).unwrap();
        app.switch_to(Screen::Customers);
        terminal.draw(|f| app.draw(f)).unwrap();

        let buffer = terminal.backend().buffer();
        let text: String = buffer.content().iter().map(|c| c.symbol()).collect();
        assert!(text.contains("Customers (5 items)"));
    }
}
