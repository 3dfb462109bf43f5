use anyhow::{Context, Result};
use clap::Parser;
use std::io;
use tracing_subscriber::EnvFilter;

mod config;
mod console;

/// Takes precedence over `[logging] filter` in config.toml.
const LOG_ENV: &str = "ACTIVITY_LOGGER_LOG";

#[derive(Parser, Debug)]
#[command(
    name = "activity-logger",
    version,
    about = "Interactive console activity logger: add, remove and list tasks by due date"
)]
struct Cli {}

fn main() -> Result<()> {
    let _cli = Cli::parse();

    let cfg = config::load_config().context("loading configuration")?;
    init_logging(&cfg.logging.filter);

    let path = config::config_path();
    tracing::info!(path = ?path, "{}", config::config_source(path.as_deref()));

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut console = console::Console::new(stdin.lock(), stdout.lock(), cfg.console);
    console.run().context("console session")?;
    tracing::debug!(remaining = console.store().len(), "session ended");

    Ok(())
}

/// Log to stderr; stdout carries the console itself.
fn init_logging(default_filter: &str) {
    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}
