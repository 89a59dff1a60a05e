//! Tic-tac-toe terminal game.

#![warn(missing_docs)]

use anyhow::{Context, Result};
use clap::Parser;
use tictactoe_cli::{Cli, Session, Settings};
use tokio::io::BufReader;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.log_level.as_deref());

    let settings = Settings::resolve(&cli).context("Failed to load settings")?;

    if cli.print_config {
        print!("{}", settings.to_toml()?);
        return Ok(());
    }

    info!(mode = %settings.mode(), "Starting tic-tac-toe");
    let session = Session::new(&settings, std::io::stdout());
    session.run(BufReader::new(tokio::io::stdin())).await?;
    Ok(())
}

/// Sends logs to stderr so they do not interleave with the board.
fn init_tracing(level: Option<&str>) {
    let filter = match level {
        Some(level) => EnvFilter::new(level),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
