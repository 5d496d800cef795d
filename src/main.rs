//! snipcase - Snippet Popup
//!
//! A small terminal popup for keeping short code snippets at hand: save them
//! with a title, language and tags, filter by language, load one back into
//! the form to edit it, or delete it. All snippets are stored together as a
//! single JSON array under the `snippets` key of a key-value storage file.

use crate::app::App;
use crate::config::Config;
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    crossterm::{
        event::{self, Event},
        execute,
        terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
    },
};
use std::error::Error;
use std::io;
use std::time::Duration;

mod app;
mod cli;
mod config;
mod editor;
mod error;
mod form;
mod handlers;
mod logging;
mod models;
mod ui;

/// Application entry point.
/// With arguments it runs a CLI command; without, it opens the popup and
/// restores the terminal when the popup closes.
fn main() -> Result<(), Box<dyn Error>> {
    color_eyre::install()?;

    let config = Config::load()?;
    logging::init(&config);

    let args: Vec<String> = std::env::args().skip(1).collect();
    if !args.is_empty() {
        return cli::execute_cli(&args, &config);
    }

    let mut app = App::open(&config);
    tracing::info!(snippets = app.snippets.len(), "popup opened");

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    tracing::info!("popup closed");
    result
}

fn run<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> Result<(), Box<dyn Error>> {
    loop {
        if app.needs_redraw {
            terminal.draw(|frame| app.render(frame))?;
            app.needs_redraw = false;
        }

        if event::poll(Duration::from_millis(250))? {
            match event::read()? {
                Event::Key(key) => {
                    if handlers::keys::handle_key_events(key, app) {
                        return Ok(());
                    }
                    app.needs_redraw = true;
                }
                Event::Resize(_, _) => app.needs_redraw = true,
                _ => {}
            }
        }
    }
}
