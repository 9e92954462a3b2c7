//! Train command - classic-mode self-training against a random opponent

use std::path::PathBuf;

use anyhow::{Context, Result, ensure};
use clap::Parser;
use rand::{SeedableRng, rngs::StdRng, seq::IndexedRandom};
use serde::Serialize;

use crate::{
    app::{App, GameConfig},
    cli::output::{create_training_progress, print_kv, print_section},
    game::{GameMode, GameResult, GameState},
    ports::TableHandle,
    q_learning::QLearningAgent,
};

#[derive(Parser, Debug)]
#[command(about = "Train the classic-mode Q-table")]
pub struct TrainArgs {
    /// Number of training games
    #[arg(long, short = 'g', default_value_t = 5000)]
    pub games: usize,

    /// Exploration probability while training
    #[arg(long, default_value_t = 0.3)]
    pub epsilon: f64,

    /// Directory holding learned tables
    #[arg(long, default_value = "memory")]
    pub memory: PathBuf,

    /// Random seed for reproducibility
    #[arg(long)]
    pub seed: Option<u64>,

    /// Print the summary as JSON
    #[arg(long)]
    pub json: bool,

    /// Hide the progress bar
    #[arg(long)]
    pub quiet: bool,
}

#[derive(Debug, Default, Serialize)]
pub struct TrainingSummary {
    pub games: usize,
    pub wins: usize,
    pub draws: usize,
    pub losses: usize,
    pub win_rate: f64,
    pub draw_rate: f64,
    pub loss_rate: f64,
    pub states: usize,
    pub seed: Option<u64>,
}

impl TrainingSummary {
    fn record(&mut self, result: &GameResult, agent: &QLearningAgent) {
        self.games += 1;
        match result.winner() {
            Some(winner) if winner == agent.player() => self.wins += 1,
            Some(_) => self.losses += 1,
            None => self.draws += 1,
        }
    }

    fn finish(&mut self, states: usize) {
        self.states = states;
        if self.games > 0 {
            let games = self.games as f64;
            self.win_rate = self.wins as f64 / games;
            self.draw_rate = self.draws as f64 / games;
            self.loss_rate = self.losses as f64 / games;
        }
    }
}

pub fn execute(args: TrainArgs) -> Result<()> {
    ensure!(
        (0.0..=1.0).contains(&args.epsilon),
        "--epsilon must be between 0 and 1 (got {})",
        args.epsilon
    );

    let mode = GameMode::Classic;
    let mut config = GameConfig::new(mode);
    if let Some(seed) = args.seed {
        config = config.with_seed(seed);
    }

    let app = App::new(&args.memory);
    let repository = app.repository();
    let handle = TableHandle::for_mode(mode);
    let mut table = repository.load_or_empty(&handle, mode.cell_count());

    let mut agent = QLearningAgent::new(config.ai_player(), mode.winning_length());
    let mut opponent_rng = match args.seed {
        Some(seed) => {
            agent = agent.with_seed(seed);
            StdRng::seed_from_u64(seed.wrapping_add(2))
        }
        None => StdRng::from_rng(&mut rand::rng()),
    };

    let progress = (!args.quiet)
        .then(|| create_training_progress(args.games as u64))
        .transpose()?;

    let mut summary = TrainingSummary {
        seed: args.seed,
        ..TrainingSummary::default()
    };

    for _ in 0..args.games {
        let mut state = GameState::new(mode.side(), config.players()?)?;
        while !state.is_finished() {
            let player = state.current_player();
            let position = if player == agent.player() {
                agent.select_action(state.board(), &table, args.epsilon)
            } else {
                state.board().available_positions().choose(&mut opponent_rng).copied()
            };
            let Some(position) = position else {
                break;
            };
            state.play(position, player, mode.winning_length())?;
        }

        agent.update_memory(state.history(), &mut table);
        summary.record(state.result(), &agent);

        if let Some(pb) = &progress {
            pb.inc(1);
            pb.set_message(format!("{} won", summary.wins));
        }
    }
    if let Some(pb) = &progress {
        pb.finish_and_clear();
    }

    repository
        .save(&handle, &table)
        .with_context(|| format!("Failed to save {handle} to {}", args.memory.display()))?;
    summary.finish(table.size());
    tracing::info!(games = summary.games, states = summary.states, "training finished");

    if args.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&summary).context("Failed to encode summary")?
        );
    } else {
        print_section("Training complete");
        print_kv("Games", &summary.games.to_string());
        print_kv("Wins", &format!("{} ({:.1}%)", summary.wins, summary.win_rate * 100.0));
        print_kv("Draws", &format!("{} ({:.1}%)", summary.draws, summary.draw_rate * 100.0));
        print_kv("Losses", &format!("{} ({:.1}%)", summary.losses, summary.loss_rate * 100.0));
        print_kv("Known states", &summary.states.to_string());
    }

    Ok(())
}
