//! Play command - interactive terminal game against the AI

use std::{
    io::{self, BufRead, Write},
    path::PathBuf,
};

use anyhow::{Context, Result};
use clap::Parser;

use crate::{
    app::{App, DifficultyLevel, GameConfig, GameSession},
    cli::output::{print_kv, print_section, render_board},
    game::{GameMode, GameResult},
};

#[derive(Parser, Debug)]
#[command(about = "Play a game in the terminal")]
pub struct PlayArgs {
    /// Board mode: classic (3x3, three in a row) or large (9x9, five in a row)
    #[arg(long, short = 'm', default_value = "classic")]
    pub mode: GameMode,

    /// AI difficulty: easy, medium or hard
    #[arg(long, short = 'd', default_value = "medium")]
    pub difficulty: DifficultyLevel,

    /// Number of seated players (2 to 4); the AI plays O
    #[arg(long, short = 'p', default_value_t = 2)]
    pub players: usize,

    /// Let humans take every seat
    #[arg(long)]
    pub no_ai: bool,

    /// Directory holding learned tables
    #[arg(long, default_value = "memory")]
    pub memory: PathBuf,

    /// Random seed for reproducibility
    #[arg(long)]
    pub seed: Option<u64>,
}

enum Input {
    Move(usize),
    Restart,
    Quit,
}

fn parse_input(line: &str) -> Option<Input> {
    match line.trim().to_ascii_lowercase().as_str() {
        "q" | "quit" | "exit" => Some(Input::Quit),
        "r" | "restart" => Some(Input::Restart),
        other => other.parse().ok().map(Input::Move),
    }
}

fn describe(result: &GameResult) -> String {
    match result {
        GameResult::Win { winner, line } => format!("{winner} wins along {line:?}"),
        GameResult::Draw => "Draw".to_string(),
        GameResult::Playing => "In progress".to_string(),
    }
}

fn show(session: &GameSession) {
    println!("\n{}", render_board(session.state().board()));
    if session.state().is_finished() {
        println!("{}", describe(session.state().result()));
        println!("Type 'r' to play again or 'q' to quit.");
    } else {
        print!("{} to move > ", session.state().current_player());
    }
}

pub fn execute(args: PlayArgs) -> Result<()> {
    let app = App::new(&args.memory);

    let mut config = GameConfig::new(args.mode)
        .with_player_count(args.players)
        .with_ai(!args.no_ai);
    if let Some(seed) = args.seed {
        config = config.with_seed(seed);
    }

    let mut session = app
        .start_session(config, args.difficulty)
        .context("Failed to start game")?;

    print_section("xo");
    print_kv("Mode", &args.mode.to_string());
    print_kv("Players", &args.players.to_string());
    if !args.no_ai {
        print_kv("Difficulty", &args.difficulty.to_string());
        print_kv("AI plays", &session.config().ai_player().to_string());
    }
    print_kv("Memory", &args.memory.display().to_string());

    let stdin = io::stdin();
    show(&session);
    io::stdout().flush().context("Failed to flush stdout")?;

    for line in stdin.lock().lines() {
        let line = line.context("Failed to read input")?;
        match parse_input(&line) {
            Some(Input::Quit) => break,
            Some(Input::Restart) => session.restart().context("Failed to restart game")?,
            Some(Input::Move(position)) => match session.play(position) {
                Ok(Some(reply)) => println!("AI played {reply}"),
                Ok(None) => {}
                Err(error) => println!("{error}"),
            },
            None => println!("Enter a cell number, 'r' to restart or 'q' to quit."),
        }
        show(&session);
        io::stdout().flush().context("Failed to flush stdout")?;
    }

    println!();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_input() {
        assert!(matches!(parse_input(" 4 "), Some(Input::Move(4))));
        assert!(matches!(parse_input("Q"), Some(Input::Quit)));
        assert!(matches!(parse_input("restart"), Some(Input::Restart)));
        assert!(parse_input("-1").is_none());
        assert!(parse_input("centre").is_none());
    }
}
