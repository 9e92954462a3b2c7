//! Board model and game rules for 3×3 and 9×9 line games

pub mod board;
pub mod lines;
pub mod mode;
pub mod result;
pub mod state;

pub use board::{Board, Cell, Player};
pub use lines::{DIRECTIONS, LineAnalyzer, all_lines};
pub use mode::GameMode;
pub use result::GameResult;
pub use state::{GameState, Move};
