//! Vitals Collector - system telemetry logging pipeline
//!
//! # Usage
//!
//! ```bash
//! # Run with the default config path
//! collector
//!
//! # Run with an explicit config and verbose diagnostics
//! collector --config configs/vitals.toml --log-level debug
//! ```

mod app;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};
use vitals_config::Config;

use crate::app::TelemetryApp;

/// Vitals Collector - system telemetry logging pipeline
#[derive(Parser, Debug)]
#[command(name = "collector")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "configs/vitals.toml")]
    config: std::path::PathBuf,

    /// Log level override (trace, debug, info, warn, error)
    #[arg(short, long)]
    log_level: Option<String>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = Config::from_file(&cli.config)?;

    let level = cli
        .log_level
        .unwrap_or_else(|| config.log.level.as_str().to_string());
    init_logging(&level)?;

    tracing::info!(config = %cli.config.display(), "configuration loaded");

    let mut app = TelemetryApp::new(config)?;
    app.start()?;
    app.wait_for_shutdown();
    app.stop();

    Ok(())
}

/// Initialize the tracing subscriber for logging
fn init_logging(level: &str) -> Result<()> {
    let filter = EnvFilter::try_new(level)
        .or_else(|_| EnvFilter::try_new("info"))
        .map_err(|e| anyhow::anyhow!("invalid log level: {}", e))?;

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_thread_ids(false))
        .with(filter)
        .init();

    Ok(())
}
