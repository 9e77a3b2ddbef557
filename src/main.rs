mod app;
mod core;
mod screens;
mod utils;
mod widgets;

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use app::App;
use utils::AppConfig;

/// Interactive terminal front-end for configuring NFS servers and clients
/// and for inspecting active exports and mounts.
#[derive(Parser)]
#[command(version, about)]
struct Cli {}

fn main() -> Result<()> {
    let _cli = Cli::parse();
    init_logging()?;

    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(e) => {
            tracing::warn!("failed to load config, using defaults: {e:#}");
            AppConfig::default()
        }
    };

    let mut app = App::new(config);
    app.run()
}

/// Logs go to a file under the user data directory: stdout and stderr
/// belong to the TUI while the alternate screen is active.
fn init_logging() -> Result<()> {
    let log_dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("nfs-tui");
    fs::create_dir_all(&log_dir).context("Failed to create log directory")?;
    let log_file =
        fs::File::create(log_dir.join("nfs-tui.log")).context("Failed to create log file")?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(Arc::new(log_file))
        .with_ansi(false)
        .init();

    Ok(())
}
