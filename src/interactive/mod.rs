//! Interactive terminal UI for the roster
//!
//! Month grid, day list and legend editor in one full-screen app. Backend
//! calls are queued by key presses and run between frames so a loading
//! overlay is drawn while they are in flight.

pub mod app;
pub mod day_view;
pub mod events;
pub mod form;
pub mod form_ui;
pub mod grid_view;
pub mod legend_view;
pub mod messages;
pub mod ui;
pub mod utils;

pub use app::App;
pub use events::EventHandler;

use anyhow::Result;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;

use crate::api::HttpBackend;
use crate::calendar::HolidayTable;
use crate::config::Config;

/// Run the interactive UI application
pub async fn run_interactive(config: Config) -> Result<()> {
    let backend = HttpBackend::from_config(&config);
    let holidays = HolidayTable::load_optional(Config::get_holidays_path().as_deref());

    // Load before touching the terminal so connection errors print normally
    let mut app = App::new(Box::new(backend), config, holidays, crate::utils::today()).await?;

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;

    let res = run_app(&mut terminal, &mut app).await;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        tracing::error!(error = %err, "interactive session ended with an error");
        eprintln!("Error: {:?}", err);
    }

    Ok(())
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> Result<()> {
    let event_handler = EventHandler::new();

    loop {
        app.tick();
        terminal.draw(|f| ui::draw(f, app))?;

        if app.has_pending() {
            app.run_pending().await;
            continue;
        }

        if let Some(event) = event_handler.next()? {
            if !app.handle_event(event)? {
                break;
            }
        }
    }

    Ok(())
}
