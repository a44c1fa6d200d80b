//! Cities - terminal front-end for the city store
//!
//! Architecture:
//! - UI Layer (Ratatui) - synchronous terminal rendering
//! - Store Layer - actor applying transitions, watched by the UI
//! - Network Layer (Tokio) - async HTTP calls against the backend

use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;
use tracing_subscriber::EnvFilter;

use cities_store::config::Config;
use cities_store::constants::DEFAULT_LOG_FILE;
use cities_store::messages::ui_events::key_to_ui_event;
use cities_store::store::CityStore;
use cities_store::ui::{self, View, ViewOutcome};

#[derive(Parser, Debug)]
#[command(name = "cities", version, about = "Browse and edit your visited cities")]
struct Args {
    /// Backend root, e.g. http://localhost:9000 (overrides the config file)
    #[arg(long)]
    base_url: Option<String>,

    /// Config file (default: <config dir>/cities/config.yaml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Log file (default: ./cities.log)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

/// Terminal cleanup guard
struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let config_path = args.config.unwrap_or_else(Config::config_path);
    let mut config = Config::load_from(&config_path)
        .with_context(|| format!("loading {}", config_path.display()))?;
    if let Some(base_url) = args.base_url {
        config = config.with_base_url(base_url);
    }
    if let Some(log_file) = args.log_file {
        config.log_file = log_file;
    }
    config.validate()?;

    // Logs go to a file so they never draw over the UI
    let _log_guard = init_logging(&config.log_file);

    let store = CityStore::from_config(&config).context("starting city store")?;

    // Terminal setup
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let _guard = TerminalGuard;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_ui_loop(&mut terminal, &store, &config.base_url).await;

    store.shutdown();
    result
}

fn init_logging(log_file: &Path) -> tracing_appender::non_blocking::WorkerGuard {
    let dir = match log_file.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let file_name = log_file
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| DEFAULT_LOG_FILE.into());

    let file_appender = tracing_appender::rolling::never(dir, file_name);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(non_blocking)
        .with_ansi(false)
        .init();
    guard
}

/// Run the synchronous UI rendering loop
async fn run_ui_loop(
    terminal: &mut Terminal<impl Backend>,
    store: &CityStore,
    base_url: &str,
) -> anyhow::Result<()> {
    let mut state_rx = store.subscribe();
    let mut state = state_rx.borrow_and_update().clone();
    let mut view = View::default();

    loop {
        view.clamp_selection(state.cities.len());
        terminal.draw(|f| ui::draw(f, &view, &state, base_url))?;

        // Poll for events with timeout
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if let Some(event) = key_to_ui_event(key, view.input_mode(), view.show_help) {
                    match view.handle(event, &state) {
                        ViewOutcome::Request(op) => {
                            tracing::debug!(op = op.name(), "UI request");
                            // Completion shows up through the state watch
                            let _ = store.dispatch(op);
                        }
                        ViewOutcome::Quit => break,
                        ViewOutcome::Nothing => {}
                    }
                }
            }
        }

        // Check for state updates (non-blocking)
        if state_rx.has_changed().unwrap_or(false) {
            state = state_rx.borrow_and_update().clone();
        }
    }

    Ok(())
}
