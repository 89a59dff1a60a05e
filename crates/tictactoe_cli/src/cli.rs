//! Command-line interface for the tic-tac-toe terminal.

use clap::Parser;
use std::path::PathBuf;
use tictactoe_engine::OpponentMode;

/// Tic-tac-toe in the terminal, against a friend or the computer
#[derive(Parser, Debug, Default)]
#[command(name = "tictactoe")]
#[command(about = "Play tic-tac-toe in the terminal", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to a TOML settings file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Who plays O: two-player or vs-computer
    #[arg(short, long)]
    pub mode: Option<OpponentMode>,

    /// Delay before the computer replies, in milliseconds (0 replies at once)
    #[arg(long)]
    pub delay_ms: Option<u64>,

    /// Seed for the computer's random choices
    #[arg(long)]
    pub seed: Option<u64>,

    /// Display name for X
    #[arg(long)]
    pub player_x: Option<String>,

    /// Display name for O (ignored against the computer)
    #[arg(long)]
    pub player_o: Option<String>,

    /// Print game events as JSON lines instead of drawing the board
    #[arg(long)]
    pub json_events: bool,

    /// Log filter, e.g. "debug" or "tictactoe_engine=trace" (overrides RUST_LOG)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Print the resolved settings as TOML and exit
    #[arg(long)]
    pub print_config: bool,
}
