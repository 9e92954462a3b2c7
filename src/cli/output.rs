//! Output formatting and progress bars for CLI

use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};

use crate::game::{Board, Cell};

/// Create a progress bar for training
pub fn create_training_progress(total_games: u64) -> Result<ProgressBar> {
    let pb = ProgressBar::new(total_games);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} games ({msg})")?
            .progress_chars("=>-"),
    );
    Ok(pb)
}

/// Print a section header
pub fn print_section(title: &str) {
    println!("\n{}", "=".repeat(60));
    println!("{title}");
    println!("{}", "=".repeat(60));
}

/// Print a key-value pair
pub fn print_kv(key: &str, value: &str) {
    println!("  {:20} {}", format!("{}:", key), value);
}

/// Render a board for the terminal, numbering free cells so they can be typed in.
pub fn render_board(board: &Board) -> String {
    let side = board.side();
    let width = (board.len() - 1).to_string().len();
    let mut out = String::new();

    for (row, cells) in board.cells().chunks(side).enumerate() {
        let line: Vec<String> = cells
            .iter()
            .enumerate()
            .map(|(col, cell)| match cell {
                Cell::Empty => format!("{:>width$}", row * side + col),
                marked => format!("{:>width$}", marked.to_char()),
            })
            .collect();
        out.push_str(&line.join(" "));
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_numbers_free_cells() {
        let board = Board::from_state_string("X___O____").unwrap();
        assert_eq!(render_board(&board), "X 1 2\n3 O 5\n6 7 8\n");
    }

    #[test]
    fn test_render_pads_large_board() {
        let rendered = render_board(&Board::new(9).unwrap());
        assert!(rendered.starts_with(" 0  1  2"));
        assert!(rendered.ends_with("72 73 74 75 76 77 78 79 80\n"));
    }
}
