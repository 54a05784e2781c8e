//! `zigly` — terminal dashboard for a zigbee2mqtt bridge.
//!
//! Built on [ratatui](https://ratatui.rs) over the reactive state in
//! `zigly-core`. The dashboard consumes a state snapshot file (device
//! list, per-device states, bridge info in the bridge's published JSON
//! shapes) and re-renders the device table as the file changes; device
//! commands are dispatched through the store's command channel.
//!
//! Logs are written to a file (default `/tmp/zigly.log`) to avoid
//! corrupting the terminal UI.
//!
//! Entry point: CLI argument parsing, tracing setup, panic hooks, and
//! app launch.

mod action;
mod app;
mod component;
mod config;
mod data_bridge;
mod event;
mod screens;
mod theme;
mod tui;
mod widgets;

use std::path::{Path, PathBuf};

use clap::Parser;
use color_eyre::eyre::Result;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};
use url::Url;

use zigly_core::DataStore;

use crate::app::App;

/// Terminal dashboard for monitoring a zigbee2mqtt bridge.
#[derive(Parser, Debug)]
#[command(name = "zigly", version, about)]
struct Cli {
    /// State snapshot file to watch (devices, states, bridge info JSON)
    #[arg(short = 'f', long, env = "ZIGLY_SNAPSHOT")]
    snapshot: Option<PathBuf>,

    /// Snapshot poll interval in milliseconds
    #[arg(long, env = "ZIGLY_POLL_INTERVAL_MS")]
    poll_interval_ms: Option<u64>,

    /// Bridge frontend base URL for device detail links
    #[arg(long, env = "ZIGLY_FRONTEND_URL")]
    frontend_url: Option<Url>,

    /// Log file path (defaults to /tmp/zigly.log)
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// Set up file-based tracing. We MUST NOT log to stdout/stderr — that
/// would corrupt the TUI output. Returns a guard that must be held for
/// the lifetime of the application to ensure logs are flushed.
fn setup_tracing(log_file: &Path, verbose: u8) -> WorkerGuard {
    let log_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!("zigly_tui={log_level},zigly_core={log_level}"))
    });

    let log_dir = log_file.parent().unwrap_or(Path::new("/tmp"));
    let log_filename = log_file
        .file_name()
        .unwrap_or(std::ffi::OsStr::new("zigly.log"));

    let file_appender = tracing_appender::rolling::never(log_dir, log_filename);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_target(true),
        )
        .init();

    guard
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Install panic/error hooks BEFORE entering the terminal
    tui::install_hooks()?;

    // Priority: CLI flags > config file / environment > defaults
    let mut config = config::load_config().unwrap_or_default();
    if cli.snapshot.is_some() {
        config.snapshot = cli.snapshot;
    }
    if let Some(interval) = cli.poll_interval_ms {
        config.poll_interval_ms = interval;
    }
    if cli.frontend_url.is_some() {
        config.frontend_url = cli.frontend_url;
    }
    if let Some(log_file) = cli.log_file {
        config.log_file = log_file;
    }

    // Tracing to file — hold the guard so logs flush on exit
    let _log_guard = setup_tracing(&config.log_file, cli.verbose);

    let snapshot_label = config
        .snapshot
        .as_deref()
        .map_or_else(|| "(not set)".to_owned(), |p| p.display().to_string());
    info!(snapshot = %snapshot_label, "starting zigly");

    let (store, mut commands) = DataStore::new();

    // No transport by construction: drain device commands to the log so
    // an embedding application can take the channel over instead.
    tokio::spawn(async move {
        while let Some(command) = commands.recv().await {
            info!(%command, "device command dispatched (no transport attached)");
        }
    });

    let mut app = App::new(store, config);
    app.run().await?;

    Ok(())
}
