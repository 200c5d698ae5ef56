//! Interactive demo wiring the components into two screens: a sign-up form
//! of validated inputs and a customer data table.

pub mod app;
pub mod sample_data;
pub mod screens;

use std::io;

use anyhow::Result;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::{error, info};

pub use app::{App, Screen};

use crate::config::Config;

/// Take over the terminal and run the demo until the user quits
pub fn run_demo(config: Config) -> Result<()> {
    info!("Starting component demo");

    // Build the app before touching the terminal so load errors print normally
    let mut app = App::new(config)?;

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = app.run(&mut terminal);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    match result {
        Ok(()) => info!("Demo exited successfully"),
        Err(ref e) => error!("Demo encountered an error: {}", e),
    }
    result
}
