//! Game results

use serde::{Deserialize, Serialize};

use super::Player;

/// Result of a position for a given required run length.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameResult {
    Playing,
    Draw,
    /// `line` lists the board indices forming the win, in scan order.
    Win { winner: Player, line: Vec<usize> },
}

impl GameResult {
    pub fn is_finished(&self) -> bool {
        !matches!(self, GameResult::Playing)
    }

    pub fn winner(&self) -> Option<Player> {
        match self {
            GameResult::Win { winner, .. } => Some(*winner),
            _ => None,
        }
    }
}
