//! Subcommands of the `xo` binary.

pub mod clear;
pub mod play;
pub mod train;
