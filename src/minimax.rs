//! Adversarial tree search for the large board
//!
//! [`MinimaxEngine`] looks a fixed number of plies ahead, alternating between
//! its own mark (maximizing) and the opponent's (minimizing), and prunes with
//! alpha-beta windows. Positions left undecided at the depth limit are scored
//! by a [`Heuristic`]. The engine keeps no state between searches.

pub mod engine;
pub mod heuristic;

pub use engine::{MinimaxEngine, SearchStats, WIN_SCORE};
pub use heuristic::{Heuristic, LineHeuristic, NullHeuristic};
