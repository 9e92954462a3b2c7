//! xo CLI - play n-in-a-row against a learning AI
//!
//! This CLI provides:
//! - Interactive games on the classic and large boards
//! - Offline training of the classic Q-table
//! - Clearing learned tables

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "xo")]
#[command(version, about = "Tic-tac-toe and gomoku-style games against a learning AI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a game in the terminal
    Play(xo_engine::cli::commands::play::PlayArgs),

    /// Train the classic-mode Q-table against a random opponent
    Train(xo_engine::cli::commands::train::TrainArgs),

    /// Forget what the AI has learned
    Clear(xo_engine::cli::commands::clear::ClearArgs),
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Play(args) => xo_engine::cli::commands::play::execute(args),
        Commands::Train(args) => xo_engine::cli::commands::train::execute(args),
        Commands::Clear(args) => xo_engine::cli::commands::clear::execute(args),
    }
}
