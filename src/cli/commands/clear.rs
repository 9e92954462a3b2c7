//! Clear command - forget the learned table for a mode

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use crate::{app::App, game::GameMode, ports::TableHandle};

#[derive(Parser, Debug)]
#[command(about = "Forget what the AI has learned")]
pub struct ClearArgs {
    /// Board mode whose table is cleared
    #[arg(long, short = 'm', default_value = "classic")]
    pub mode: GameMode,

    /// Directory holding learned tables
    #[arg(long, default_value = "memory")]
    pub memory: PathBuf,
}

pub fn execute(args: ClearArgs) -> Result<()> {
    let app = App::new(&args.memory);
    app.clear_memory(args.mode).with_context(|| {
        format!(
            "Failed to clear {} in {}",
            TableHandle::for_mode(args.mode),
            args.memory.display()
        )
    })?;

    println!("Cleared learned table for {} mode", args.mode);
    Ok(())
}
