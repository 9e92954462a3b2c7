//! Q-learning agent
//!
//! Selects moves ε-greedily from a [`QTable`] and learns from finished games
//! by propagating the terminal reward backwards through the agent's moves.

use rand::{Rng, SeedableRng, rngs::StdRng, seq::IndexedRandom};

use crate::{
    game::{Board, Cell, GameResult, Player},
    q_learning::q_table::QTable,
    types::{DISCOUNT_FACTOR, LEARNING_RATE, reward},
};

fn build_rng(seed: Option<u64>) -> StdRng {
    if let Some(seed) = seed {
        StdRng::seed_from_u64(seed)
    } else {
        StdRng::from_rng(&mut rand::rng())
    }
}

/// Q-learning agent (off-policy TD control) playing one mark.
///
/// The agent does not own a table: the caller passes the snapshot to read
/// from or the copy to update, so the owner decides when it is persisted.
#[derive(Debug, Clone)]
pub struct QLearningAgent {
    player: Player,
    winning_length: usize,
    learning_rate: f64,
    discount_factor: f64,
    rng: StdRng,
    rng_seed: Option<u64>,
}

impl QLearningAgent {
    /// Create an agent playing `player` in games won by `winning_length` in a row.
    pub fn new(player: Player, winning_length: usize) -> Self {
        Self {
            player,
            winning_length,
            learning_rate: LEARNING_RATE,
            discount_factor: DISCOUNT_FACTOR,
            rng: build_rng(None),
            rng_seed: None,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self.rng_seed = Some(seed);
        self
    }

    pub fn with_learning_rate(mut self, learning_rate: f64) -> Self {
        self.learning_rate = learning_rate;
        self
    }

    pub fn with_discount_factor(mut self, discount_factor: f64) -> Self {
        self.discount_factor = discount_factor;
        self
    }

    pub fn player(&self) -> Player {
        self.player
    }

    pub fn learning_rate(&self) -> f64 {
        self.learning_rate
    }

    pub fn discount_factor(&self) -> f64 {
        self.discount_factor
    }

    /// ε-greedy action selection.
    ///
    /// With probability `epsilon` a uniformly random free cell, otherwise the
    /// first free cell with the highest value in the row for this board.
    /// Returns `None` when the board has no free cell.
    pub fn select_action(&mut self, board: &Board, table: &QTable, epsilon: f64) -> Option<usize> {
        let available = board.available_positions();
        if available.is_empty() {
            return None;
        }

        if self.rng.random::<f64>() < epsilon {
            // Explore: random action
            available.choose(&mut self.rng).copied()
        } else {
            // Exploit: greedy action based on Q-values
            table.greedy_action(&board.to_state_string(), &available)
        }
    }

    /// Reward of a final board from this agent's point of view.
    pub fn final_reward(&self, board: &Board) -> f64 {
        match board.check_game_result(self.winning_length) {
            GameResult::Win { winner, .. } if winner == self.player => reward::WIN,
            GameResult::Win { .. } => reward::LOSS,
            GameResult::Draw => reward::DRAW,
            GameResult::Playing => reward::UNFINISHED,
        }
    }

    /// Learn from one game's board history, updating `table` in place.
    ///
    /// Transitions are walked from the end of the game to the start and only
    /// those where this agent placed a mark are updated. The agent's last move
    /// receives the terminal reward with no future value; every earlier move
    /// receives no reward and the discounted best value of the state where the
    /// agent moved next.
    ///
    /// That successor is deliberately not the board right after the move
    /// (`history[i + 1]`): with other players moving in between, the row for
    /// that board is never written, so its maximum would always be zero and
    /// the terminal reward could not travel back past the last move.
    ///
    /// Histories with fewer than three boards are ignored. Returns the number
    /// of updates applied.
    pub fn update_memory(&self, history: &[Board], table: &mut QTable) -> usize {
        let Some(terminal) = history.last() else {
            return 0;
        };
        if history.len() < 3 {
            return 0;
        }

        let final_reward = self.final_reward(terminal);
        let mut next_decision: Option<String> = None;
        let mut updates = 0;

        for i in (0..history.len() - 1).rev() {
            let Some(action) = placed_cell(&history[i], &history[i + 1], self.player) else {
                continue;
            };
            let state = history[i].to_state_string();

            let (step_reward, max_future) = match &next_decision {
                None => (final_reward, 0.0),
                Some(next) => (0.0, table.max_value(next)),
            };
            table.q_learning_update(
                &state,
                action,
                step_reward,
                max_future,
                self.learning_rate,
                self.discount_factor,
            );

            next_decision = Some(state);
            updates += 1;
        }

        tracing::debug!(
            player = %self.player,
            final_reward,
            updates,
            states = table.size(),
            "q-learning memory updated"
        );
        updates
    }
}

/// The single cell that went from empty to `player`'s mark between two boards.
fn placed_cell(before: &Board, after: &Board, player: Player) -> Option<usize> {
    if before.len() != after.len() {
        return None;
    }
    let target = player.to_cell();
    let mut placed = before
        .cells()
        .iter()
        .zip(after.cells())
        .enumerate()
        .filter(|(_, (b, a))| **b == Cell::Empty && **a == target)
        .map(|(i, _)| i);

    match (placed.next(), placed.next()) {
        (Some(position), None) => Some(position),
        _ => None,
    }
}
