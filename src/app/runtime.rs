//! TUI runtime for revue
//!
//! Single-threaded event loop in the usual shape: draw, poll input
//! with a short timeout, drain background messages, tick. The review
//! request is the only suspending operation and runs as a spawned
//! tokio task, so the loop stays responsive while it is outstanding.

use crate::app::{background, input, App};
use crate::config::Config;
use crate::ui;
use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;
use std::io;
use std::path::PathBuf;
use std::sync::mpsc;
use std::time::Duration;

/// Run the TUI application with background review tasks
pub async fn run_tui(config: Config, source: String, source_path: Option<PathBuf>) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(config, source, source_path);
    let (tx, rx) = mpsc::channel();

    let result = run_loop(&mut terminal, &mut app, tx, rx);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    // Persist the last-used tone so the next session starts with it.
    if app.tone != app.config.default_tone {
        app.config.default_tone = app.tone;
        if let Err(err) = app.config.save() {
            eprintln!("  Warning: could not save config: {}", err);
        }
    }

    result
}

fn run_loop<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    tx: mpsc::Sender<crate::app::BackgroundMessage>,
    rx: mpsc::Receiver<crate::app::BackgroundMessage>,
) -> Result<()> {
    loop {
        terminal.draw(|f| ui::render(f, app))?;

        // Short poll keeps the spinner and toast expiry moving while a
        // request is outstanding.
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    input::handle_key(app, key, &tx);
                }
            }
        }

        background::drain_messages(app, &rx);
        app.tick();

        if app.should_quit {
            return Ok(());
        }
    }
}
