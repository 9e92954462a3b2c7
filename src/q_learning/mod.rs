//! Tabular Q-learning for the classic board
//!
//! The agent keeps one row of action values per board it has seen, keyed by
//! the board's canonical state string. Moves are picked ε-greedily; after a
//! game the terminal reward is propagated backwards through the agent's own
//! moves with the Q-learning update
//!
//! ```text
//! Q(s,a) ← Q(s,a) + α·(r + γ·max_a' Q(s',a') − Q(s,a))
//! ```
//!
//! ## Usage Example
//!
//! ```
//! use xo_engine::game::{Board, Player};
//! use xo_engine::q_learning::{QLearningAgent, QTable};
//!
//! let mut agent = QLearningAgent::new(Player::O, 3).with_seed(7);
//! let table = QTable::new(9);
//! let board = Board::new(3)?;
//!
//! // Untrained and greedy: the first free cell.
//! assert_eq!(agent.select_action(&board, &table, 0.0), Some(0));
//! # Ok::<(), xo_engine::Error>(())
//! ```

pub mod agent;
pub mod q_table;
pub mod serialization;

// Public re-exports
pub use agent::QLearningAgent;
pub use q_table::QTable;
pub use serialization::{SavedQTable, decode_table, encode_table};
