//! Storefront TUI - terminal storefront with a schema-driven sign-up form
//!
//! A Ratatui-based TUI that lists products and recent orders from the
//! storefront services and renders a persisted, validated sign-up form.

mod api;
mod app;
mod config;
mod platform;
mod state;
mod ui;

use anyhow::Result;
use app::App;
use config::TuiConfig;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use directories::ProjectDirs;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt::writer::BoxMakeWriter, layer::SubscriberExt, util::SubscriberInitExt};

const LOG_FILE: &str = "storefront-tui.log";

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to a file; the alternate screen owns the terminal
    let (log_writer, log_guard) = log_writer(log_dir().as_deref());
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "storefront_tui=info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(log_writer),
        )
        .init();

    let config = TuiConfig::load().unwrap_or_else(|err| {
        tracing::warn!("Ignoring unreadable config: {err:#}");
        TuiConfig::default()
    });
    let mut app = App::new(&config)?;

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
        tracing::error!("Exiting after error: {err:#}");
        drop(log_guard);
        eprintln!("Error: {err:?}");
        std::process::exit(1);
    }

    Ok(())
}

/// File writer under `dir`, or a sink when there is nowhere to log
fn log_writer(dir: Option<&Path>) -> (BoxMakeWriter, Option<WorkerGuard>) {
    match dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::never(dir, LOG_FILE);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            (BoxMakeWriter::new(writer), Some(guard))
        }
        None => (BoxMakeWriter::new(io::sink), None),
    }
}

/// Log directory under the platform data dir, created on demand
fn log_dir() -> Option<PathBuf> {
    let dir = ProjectDirs::from("io", "storefront", "storefront-tui")?
        .data_dir()
        .join("logs");
    std::fs::create_dir_all(&dir).ok()?;
    Some(dir)
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> Result<()> {
    // Show the loading placeholders before the first fetch completes
    terminal.draw(|frame| ui::draw(frame, app))?;
    app.refresh_all().await;

    loop {
        terminal.draw(|frame| ui::draw(frame, app))?;

        if event::poll(Duration::from_millis(100))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    // Global quit: Ctrl+C
                    if key.code == KeyCode::Char('c')
                        && key.modifiers.contains(KeyModifiers::CONTROL)
                    {
                        return Ok(());
                    }

                    app.handle_key(key).await?;
                }
                Event::Resize(_width, _height) => {
                    // Redrawn on the next loop iteration
                }
                _ => {}
            }
        }

        if app.should_quit() {
            return Ok(());
        }
    }
}
