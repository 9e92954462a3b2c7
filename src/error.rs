//! Error types for the xo-engine crate

use thiserror::Error;

use crate::game::Player;

/// Main error type for the xo-engine crate
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("illegal move: position {position} is not available")]
    IllegalMove { position: usize },

    #[error("position {position} is out of bounds (board has {cells} cells)")]
    PositionOutOfRange { position: usize, cells: usize },

    #[error("game already over")]
    GameOver,

    #[error("player {player} is not taking part in this game")]
    InactivePlayer { player: Player },

    #[error("it is not {player}'s turn")]
    OutOfTurn { player: Player },

    #[error("invalid player count {count} (expected 2 to 4 distinct players)")]
    InvalidPlayerCount { count: usize },

    #[error("board of {len} cells is not a non-empty perfect square")]
    InvalidBoardLength { len: usize },

    #[error("invalid character '{character}' at position {position} in '{context}'")]
    InvalidCellCharacter {
        character: char,
        position: usize,
        context: String,
    },

    #[error("invalid configuration: {message}")]
    InvalidConfiguration { message: String },

    #[error("unsupported q-table format version {found} (expected {expected})")]
    UnsupportedTableVersion { found: u32, expected: u32 },

    #[error("failed to {operation}: {source}")]
    Io {
        operation: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to {operation}: {message}")]
    SerializationContext { operation: String, message: String },
}

/// Convenience type alias for Results using the crate's Error type
pub type Result<T> = std::result::Result<T, Error>;

impl From<std::io::Error> for Error {
    fn from(source: std::io::Error) -> Self {
        Error::Io {
            operation: "IO operation".to_string(),
            source,
        }
    }
}
