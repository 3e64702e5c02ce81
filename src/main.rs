//! Streamify - movie discovery in the terminal
//!
//! Search TMDB, page through results, keep a watch list and play trailers.
//!
//! # Usage
//!
//! ```bash
//! TMDB_API_KEY=... streamify
//! streamify --query "blade runner" --dark
//! ```

use std::io::{stdout, Stdout};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc::{self, UnboundedReceiver};

use streamify::api::TmdbClient;
use streamify::app::{App, Completion};
use streamify::cli::Cli;
use streamify::config::Config;
use streamify::logging;
use streamify::models::Preferences;
use streamify::player::LocalPlayer;
use streamify::runtime::EffectRunner;
use streamify::ui;

/// Terminal type alias for convenience
type Tui = Terminal<CrosstermBackend<Stdout>>;

const TICK_RATE: Duration = Duration::from_millis(100);

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Err(e) = logging::init_logging() {
        eprintln!("Warning: Failed to initialize logging: {}", e);
    }
    tracing::info!("=== Streamify starting ===");

    let mut config = Config::load(cli.config.as_deref()).context("loading config")?;
    cli.apply(&mut config);
    let api_key = config.api_key()?;
    tracing::debug!(?config, "config loaded");

    let client = TmdbClient::with_options(
        api_key,
        config.api_base_url.clone(),
        config.request_timeout(),
    )
    .context("building HTTP client")?;

    let result = run_tui(client, &config).await;
    if let Err(ref err) = result {
        tracing::error!(error = ?err, "application error");
    }
    tracing::info!("Streamify shutting down");
    result
}

// =============================================================================
// TUI Mode
// =============================================================================

/// Initialize the terminal for TUI mode
fn init_terminal() -> Result<Tui> {
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Restore terminal to normal state
fn restore_terminal(terminal: &mut Tui) -> Result<()> {
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;
    Ok(())
}

/// Run interactive TUI
async fn run_tui(client: TmdbClient, config: &Config) -> Result<()> {
    let (tx, rx) = mpsc::unbounded_channel();
    let mut runner = EffectRunner::new(
        client,
        LocalPlayer::new(config.player),
        config.debounce_delay(),
        tx,
    );

    let mut app = App::with_preferences(Preferences {
        dark_mode: config.dark_mode,
    });
    app.search_input.set_draft(config.initial_query.as_str());
    runner.run_all(app.submit_query(&config.initial_query));

    let mut terminal = init_terminal()?;

    let result = run_event_loop(&mut terminal, &mut app, &mut runner, rx).await;

    // Always restore terminal, even on error
    restore_terminal(&mut terminal)?;

    result
}

/// Main event loop - applies completions, handles input, renders UI
async fn run_event_loop(
    terminal: &mut Tui,
    app: &mut App,
    runner: &mut EffectRunner,
    mut completions: UnboundedReceiver<Completion>,
) -> Result<()> {
    while app.running {
        // Apply finished async work before drawing
        while let Ok(completion) = completions.try_recv() {
            let effects = app.apply(completion);
            runner.run_all(effects);
        }

        terminal.draw(|frame| ui::render_app(frame, app))?;

        // Poll for input off the async workers so spawned requests keep running
        let event = tokio::task::block_in_place(|| -> std::io::Result<Option<Event>> {
            if event::poll(TICK_RATE)? {
                event::read().map(Some)
            } else {
                Ok(None)
            }
        })?;

        let effects = match event {
            // Only handle key press events (ignore releases on Windows)
            Some(Event::Key(key)) if key.kind == KeyEventKind::Press => app.handle_key(key),
            Some(Event::Mouse(mouse)) => {
                let size = terminal.size()?;
                let screen = ratatui::layout::Rect::new(0, 0, size.width, size.height);
                app.handle_mouse(mouse, screen)
            }
            _ => Vec::new(),
        };
        runner.run_all(effects);
    }

    Ok(())
}
