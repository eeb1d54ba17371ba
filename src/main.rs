//! Transport order TUI
//!
//! A Ratatui-based wizard that collects a transport order in six steps
//! and sends it to the logistics team's endpoint.

mod app;
mod config;
mod error;
mod order;
mod platform;
mod state;
mod submission;
mod ui;

use anyhow::Result;
use app::App;
use config::AppConfig;
use crossterm::{
    event::{self, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::sync::Arc;
use std::time::Duration;
use submission::SubmissionClient;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const POLL_INTERVAL: Duration = Duration::from_millis(100);

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging to a file while the alternate screen is up
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "transport_order_tui=info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(log_writer()),
        )
        .init();

    // A broken config file still lets the wizard start with defaults
    let mut startup_errors = Vec::new();
    if let Err(e) = AppConfig::init_file() {
        tracing::warn!(error = %e, "could not write default config");
    }
    let config = AppConfig::load().unwrap_or_else(|e| {
        tracing::warn!(error = %e, "falling back to default config");
        startup_errors.push(format!("Config could not be read, using defaults: {e}"));
        let mut config = AppConfig::default();
        config.apply_endpoint_override(std::env::var(config::ENDPOINT_ENV).ok());
        config
    });
    let client = SubmissionClient::from_config(&config)?;
    tracing::info!(endpoint = %client.endpoint(), variant = ?config.form_variant, "starting");

    let mut app = App::new(&config, Arc::new(client), state::local_clock());
    for message in startup_errors {
        app.push_error(message);
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    // Handle any errors
    if let Err(err) = result {
        eprintln!("Error: {err:?}");
        std::process::exit(1);
    }

    Ok(())
}

/// Append to the log file, or drop events when it cannot be opened
fn log_writer() -> BoxMakeWriter {
    match AppConfig::log_path().map(|path| AppConfig::open_log_file(&path)) {
        Some(Ok(file)) => BoxMakeWriter::new(Arc::new(file)),
        _ => BoxMakeWriter::new(io::sink),
    }
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> Result<()> {
    loop {
        terminal.draw(|frame| ui::draw(frame, app))?;

        if event::poll(POLL_INTERVAL)? {
            if let Event::Key(key) = event::read()? {
                // Global quit: Ctrl+C
                if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL)
                {
                    app.quit();
                } else {
                    app.handle_key(key).await?;
                }
            }
        }

        app.poll_submission().await;

        if app.should_quit() {
            return Ok(());
        }
    }
}
