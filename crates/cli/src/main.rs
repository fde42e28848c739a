//! Scrollsync main binary
//!
//! Replays recorded scroll events through the synchronizer and reports what
//! it asked of the terminal and the container.

use anyhow::{Context, Result};
use clap::Parser;
use scrollsync_config::Config;
use scrollsync_core::logging;
use std::path::Path;
use tracing::info;

mod app;
mod cli;

use app::ReplayApp;
use cli::{Cli, Commands};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load_from_file(path)
            .with_context(|| format!("Failed to load config '{}'", path.display()))?,
        None => Config::load_or_default(),
    };
    config.validate().context("Invalid configuration")?;

    logging::init_logging(&config.logging).context("Failed to initialize logging")?;

    info!(
        version = scrollsync_core::VERSION,
        scroller_style = ?config.scrollbar.style,
        "Starting scrollsync"
    );

    match cli.command {
        Commands::Replay { trace, json } => replay(&trace, &config, json).await?,
        Commands::Config => {
            print!("{}", config.to_toml().context("Failed to render configuration")?);
        }
    }

    Ok(())
}

async fn replay(trace: &Path, config: &Config, json: bool) -> Result<()> {
    let content = tokio::fs::read_to_string(trace)
        .await
        .with_context(|| format!("Failed to read trace '{}'", trace.display()))?;
    let events = scrollsync_surface::parse_trace(&content)
        .with_context(|| format!("Failed to parse trace '{}'", trace.display()))?;

    info!(
        trace = %trace.display(),
        events = events.len(),
        "Replaying trace"
    );

    let report = ReplayApp::new(config.scrollbar.clone()).replay(events)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", report.render_text());
    }
    Ok(())
}
