//! Shared learning constants.

/// Learning rate α used by the Q-learning agent.
pub const LEARNING_RATE: f64 = 0.5;

/// Discount factor γ used by the Q-learning agent.
pub const DISCOUNT_FACTOR: f64 = 0.9;

/// Terminal rewards, from the learning player's point of view.
///
/// Only the relative magnitudes matter: a draw is worth a little more than
/// nothing, a loss mirrors a win.
pub mod reward {
    pub const WIN: f64 = 1.0;

    pub const DRAW: f64 = 0.1;

    pub const LOSS: f64 = -1.0;

    /// Reward for a history that stops before the game is decided.
    pub const UNFINISHED: f64 = 0.0;
}
