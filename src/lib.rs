//! Board model and AI opponents for n-in-a-row games
//!
//! This crate provides:
//! - Square boards with up to four marks and line-based win detection
//! - Turn sequencing with full board history
//! - A tabular Q-learning agent that learns from finished games
//! - Depth-limited minimax with alpha-beta pruning and a line heuristic
//! - An AI façade routing between the two, with pluggable Q-table storage

pub mod adapters;
pub mod app;
pub mod cli;
pub mod engine;
pub mod error;
pub mod game;
pub mod minimax;
pub mod ports;
pub mod q_learning;
pub mod types;

pub use app::{App, Difficulty, DifficultyLevel, GameConfig, GameSession};
pub use engine::AiEngine;
pub use error::{Error, Result};
pub use game::{Board, Cell, GameMode, GameResult, GameState, Player};
