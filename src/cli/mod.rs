//! CLI infrastructure for the `xo` binary
//!
//! Commands for playing against the AI in a terminal, training the classic
//! Q-table offline, and clearing what was learned.

pub mod commands;
pub mod output;
