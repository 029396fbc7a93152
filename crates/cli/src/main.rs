//! HueConsole main binary
//!
//! Reads lines from stdin, submits each to a console and prints the
//! console's colored output.

use anyhow::{Context, Result};
use clap::Parser;
use hueconsole_cli::HeadlessApp;
use hueconsole_config::Config;
use hueconsole_core::logging::{self, LogLevel};
use std::io::Write;
use std::path::PathBuf;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;

#[derive(Parser)]
#[command(name = "hueconsole")]
#[command(about = "Interactive colored console on stdin/stdout")]
#[command(version)]
struct Cli {
    /// Configuration file (defaults to the per-user config path)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    log_level: Option<LogLevel>,

    /// Emit logs as JSON
    #[arg(long)]
    json_logs: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load_from_file(path)
            .with_context(|| format!("Failed to load configuration from {}", path.display()))?,
        None => Config::load_or_default(),
    };
    if let Some(level) = cli.log_level {
        config.logging.global_level = level;
    }
    if cli.json_logs {
        config.logging.json_format = true;
    }
    config.validate().context("Invalid configuration")?;

    logging::init_logging(&config.logging).context("Failed to initialize logging")?;
    info!(
        subsystem = "cli",
        version = hueconsole_core::VERSION,
        config_file = ?cli.config,
        "Starting HueConsole"
    );

    let mut app = HeadlessApp::new(&config);
    let mut stdout = std::io::stdout();
    write!(stdout, "{}", app.take_output())?;
    stdout.flush()?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await.context("Failed to read stdin")? {
        write!(stdout, "{}", app.feed_line(&line))?;
        stdout.flush()?;
        if app.should_quit() {
            break;
        }
    }

    write!(stdout, "{}", app.finish())?;
    stdout.flush()?;
    info!(subsystem = "cli", "HueConsole shutting down");
    Ok(())
}
