//! Configuration types for games and AI difficulty.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{
    Result,
    error::Error,
    game::{GameMode, Player},
};

/// Named difficulty levels offered to players.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DifficultyLevel {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl fmt::Display for DifficultyLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DifficultyLevel::Easy => write!(f, "easy"),
            DifficultyLevel::Medium => write!(f, "medium"),
            DifficultyLevel::Hard => write!(f, "hard"),
        }
    }
}

impl FromStr for DifficultyLevel {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "easy" => Ok(DifficultyLevel::Easy),
            "medium" | "normal" => Ok(DifficultyLevel::Medium),
            "hard" => Ok(DifficultyLevel::Hard),
            _ => Err(Error::InvalidConfiguration {
                message: format!("unknown difficulty '{s}' (expected easy, medium or hard)"),
            }),
        }
    }
}

/// How the AI behaves for one game.
///
/// A positive `search_depth` selects minimax; zero selects Q-learning.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Difficulty {
    /// Q-learning exploration probability
    pub epsilon: f64,
    /// Minimax plies; 0 means "use Q-learning"
    pub search_depth: u8,
    /// Probability of replacing the searched move with a random one
    pub exploration_rate: f64,
}

impl Difficulty {
    pub const MAX_SEARCH_DEPTH: u8 = 3;

    /// Q-learning difficulty exploring with probability `epsilon`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] unless `epsilon` is in [0, 1].
    pub fn q_learning(epsilon: f64) -> Result<Self> {
        check_probability("epsilon", epsilon)?;
        Ok(Self {
            epsilon,
            search_depth: 0,
            exploration_rate: 0.0,
        })
    }

    /// Minimax difficulty searching `depth` plies, distracted with
    /// probability `exploration_rate`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] unless `depth` is 1 to 3 and
    /// `exploration_rate` is in [0, 1].
    pub fn minimax(depth: u8, exploration_rate: f64) -> Result<Self> {
        if !(1..=Self::MAX_SEARCH_DEPTH).contains(&depth) {
            return Err(Error::InvalidConfiguration {
                message: format!(
                    "search depth {depth} out of range (1 to {})",
                    Self::MAX_SEARCH_DEPTH
                ),
            });
        }
        check_probability("exploration rate", exploration_rate)?;
        Ok(Self {
            epsilon: 0.0,
            search_depth: depth,
            exploration_rate,
        })
    }

    /// Preset for a level in a mode: Q-learning on the classic board, minimax
    /// on the large one.
    pub fn preset(level: DifficultyLevel, mode: GameMode) -> Self {
        let (epsilon, search_depth, exploration_rate) = match (mode, level) {
            (GameMode::Classic, DifficultyLevel::Easy) => (0.5, 0, 0.0),
            (GameMode::Classic, DifficultyLevel::Medium) => (0.2, 0, 0.0),
            (GameMode::Classic, DifficultyLevel::Hard) => (0.0, 0, 0.0),
            (GameMode::Large, DifficultyLevel::Easy) => (0.0, 1, 0.3),
            (GameMode::Large, DifficultyLevel::Medium) => (0.0, 2, 0.1),
            (GameMode::Large, DifficultyLevel::Hard) => (0.0, 3, 0.0),
        };
        Self {
            epsilon,
            search_depth,
            exploration_rate,
        }
    }

    pub fn uses_search(&self) -> bool {
        self.search_depth > 0
    }
}

fn check_probability(name: &str, value: f64) -> Result<()> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(Error::InvalidConfiguration {
            message: format!("{name} {value} must be between 0 and 1"),
        })
    }
}

/// Configuration for one game.
///
/// Players are the first `player_count` marks of X, O, Triangle, Square, in
/// that turn order. When the AI is enabled it plays O.
///
/// # Examples
///
/// ```
/// use xo_engine::app::GameConfig;
/// use xo_engine::game::{GameMode, Player};
///
/// let config = GameConfig::new(GameMode::Large)
///     .with_player_count(3)
///     .with_seed(42);
/// assert_eq!(config.players()?, vec![Player::X, Player::O, Player::Triangle]);
/// # Ok::<(), xo_engine::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub mode: GameMode,
    pub player_count: usize,
    pub ai_enabled: bool,
    /// Random seed for reproducibility
    pub seed: Option<u64>,
}

impl GameConfig {
    /// Two players, AI enabled, non-deterministic.
    pub fn new(mode: GameMode) -> Self {
        Self {
            mode,
            player_count: 2,
            ai_enabled: true,
            seed: None,
        }
    }

    pub fn with_player_count(mut self, player_count: usize) -> Self {
        self.player_count = player_count;
        self
    }

    pub fn with_ai(mut self, ai_enabled: bool) -> Self {
        self.ai_enabled = ai_enabled;
        self
    }

    /// Set the random seed for deterministic behavior.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Seated players in turn order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPlayerCount`] unless `player_count` is 2 to 4.
    pub fn players(&self) -> Result<Vec<Player>> {
        if !(2..=Player::ALL.len()).contains(&self.player_count) {
            return Err(Error::InvalidPlayerCount {
                count: self.player_count,
            });
        }
        Ok(Player::ALL[..self.player_count].to_vec())
    }

    /// Mark played by the AI.
    pub fn ai_player(&self) -> Player {
        Player::O
    }

    /// Mark the AI searches against.
    pub fn human_player(&self) -> Player {
        Player::X
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new(GameMode::default())
    }
}
