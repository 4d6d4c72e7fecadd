//! helm-tui - terminal browser for Helm.
//!
//! # Environment Variables
//!
//! See the [`config`](helm_tui::config) module for available configuration
//! options. Command-line flags override them.

use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::sync::oneshot;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use helm_tui::config::Config;
use helm_tui::error::AppError;
use helm_tui::tui::event::{EventHandler, TuiEvent};
use helm_tui::tui::{install_panic_hook, ui, App, Runtime, Tui};

/// helm-tui - browse Helm releases, repositories, hub charts and plugins.
#[derive(Parser, Debug)]
#[command(name = "helm-tui")]
#[command(author, version, about, long_about = None)]
#[command(after_help = "\
ENVIRONMENT VARIABLES:
    HELM_TUI_DIR         Working directory (default: ~/.helm-tui)
    HELM_TUI_START_TAB   Initial tab: releases, repos, hub, plugins (default: releases)
    HELM_TUI_TICK_MS     Tick interval in milliseconds (default: 250)
    HELM_TUI_LOG         Log filter, written to <dir>/helm-tui.log (default: info)

KEYS:
    tab / shift+tab      Next / previous tab
    [ / ]                History back / forward
    :                    Command bar (releases, repos, hub, plugins, quit)
    ctrl+c               Quit
")]
struct Cli {
    /// Working directory.
    #[arg(long, value_name = "DIR")]
    dir: Option<PathBuf>,

    /// Tab to start on (any command alias).
    #[arg(long, value_name = "TAB")]
    tab: Option<String>,

    /// Tick interval in milliseconds.
    #[arg(long, value_name = "MS")]
    tick_ms: Option<u64>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = Config::from_env()
        .and_then(|config| config.apply_overrides(cli.dir, cli.tab.as_deref(), cli.tick_ms))
        .context("Failed to load configuration")?;

    init_logging(&config);
    install_panic_hook();

    // the router is strictly sequential; blocking work goes to spawn_blocking
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to create tokio runtime")?;

    runtime.block_on(run_tui(config))
}

async fn run_tui(config: Config) -> Result<()> {
    info!(
        working_dir = %config.working_dir.display(),
        start_tab = %config.start_tab,
        tick_ms = config.tick_rate.as_millis() as u64,
        "Starting helm-tui"
    );

    let mut tui = Tui::new().context("Failed to initialize terminal")?;
    let mut app = App::new(config.clone());
    let mut runtime = Runtime::new();

    let (shutdown_tx, shutdown_rx) = oneshot::channel();
    let handler = EventHandler::with_tick_rate(runtime.sender(), shutdown_rx, config.tick_rate);
    let handler_task = tokio::spawn(handler.run());

    let (width, height) = tui.size()?;
    runtime
        .sender()
        .send(TuiEvent::Resize(width, height))
        .await
        .context("Event loop closed before startup")?;

    let result = runtime
        .run(&mut app, |app| tui.draw(|frame| ui::render(frame, app)))
        .await;

    let _ = shutdown_tx.send(());
    if let Err(e) = handler_task.await {
        debug!("event handler task ended abnormally: {}", e);
    }
    tui.restore().context("Failed to restore terminal")?;
    result?;

    if let Some(message) = app.fatal() {
        return Err(AppError::Fatal(message.to_string()).into());
    }

    info!("helm-tui stopped");
    Ok(())
}

/// Initializes the logging subsystem.
///
/// The terminal belongs to the UI, so logs go to `<working_dir>/helm-tui.log`.
/// The file is opened per write so logging starts working as soon as the
/// working directory exists; until then, and if it cannot be opened, lines
/// are discarded.
fn init_logging(config: &Config) {
    let filter = EnvFilter::try_new(&config.log_filter).unwrap_or_else(|_| EnvFilter::new("info"));
    let path = config.log_file();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_level(true)
        .with_ansi(false)
        .with_writer(move || -> Box<dyn Write> {
            match OpenOptions::new().create(true).append(true).open(&path) {
                Ok(file) => Box::new(file),
                Err(_) => Box::new(io::sink()),
            }
        })
        .init();
}
