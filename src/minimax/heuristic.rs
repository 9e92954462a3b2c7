//! Static evaluation of non-terminal positions

use crate::game::{Board, Cell, Player, all_lines};

/// Trait for evaluating a board position from a player's perspective.
pub trait Heuristic: Send + Sync {
    /// Score `board` for `player`; positive favours `player`.
    fn evaluate(&self, board: &Board, player: Player) -> i64;
}

/// Constant-zero evaluation. Search then only distinguishes decided lines.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullHeuristic;

impl Heuristic for NullHeuristic {
    fn evaluate(&self, _board: &Board, _player: Player) -> i64 {
        0
    }
}

/// Scores every window of `winning_length` cells.
///
/// A window still open for one side (only that side's marks plus empty
/// cells) is worth 10^(k-1) for k marks. Windows open for a single other
/// player count against `player` at one and a half times that weight. Windows
/// holding marks of two different players are blocked and worth nothing.
#[derive(Debug, Clone)]
pub struct LineHeuristic {
    side: usize,
    winning_length: usize,
    lines: Vec<Vec<usize>>,
}

impl LineHeuristic {
    pub fn new(side: usize, winning_length: usize) -> Self {
        Self {
            side,
            winning_length,
            lines: all_lines(side, winning_length),
        }
    }

    fn own_weight(marks: usize) -> i64 {
        match marks {
            0 => 0,
            k => 10i64.pow((k - 1) as u32),
        }
    }

    fn opponent_weight(marks: usize) -> i64 {
        Self::own_weight(marks) * 3 / 2
    }

    fn score_lines(lines: &[Vec<usize>], board: &Board, player: Player) -> i64 {
        let own_cell = player.to_cell();
        let cells = board.cells();
        let mut score = 0;

        for line in lines {
            let mut own = 0;
            let mut other = 0;
            let mut other_cell = None;
            let mut blocked = false;
            for &idx in line {
                match cells[idx] {
                    Cell::Empty => {}
                    c if c == own_cell => own += 1,
                    c => {
                        // Two different opponents in one window block it for both.
                        blocked |= other_cell.is_some_and(|seen| seen != c);
                        other_cell = Some(c);
                        other += 1;
                    }
                }
            }
            if blocked || (own > 0 && other > 0) {
                continue;
            }
            score += Self::own_weight(own) - Self::opponent_weight(other);
        }

        score
    }
}

impl Heuristic for LineHeuristic {
    fn evaluate(&self, board: &Board, player: Player) -> i64 {
        if board.side() == self.side {
            Self::score_lines(&self.lines, board, player)
        } else {
            let lines = all_lines(board.side(), self.winning_length);
            Self::score_lines(&lines, board, player)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(s: &str) -> Board {
        Board::from_state_string(s).unwrap()
    }

    #[test]
    fn test_empty_board_is_neutral() {
        let heuristic = LineHeuristic::new(3, 3);
        assert_eq!(heuristic.evaluate(&Board::new(3).unwrap(), Player::O), 0);
    }

    #[test]
    fn test_center_beats_corner_beats_edge() {
        let heuristic = LineHeuristic::new(3, 3);
        let center = heuristic.evaluate(&board("____O____"), Player::O);
        let corner = heuristic.evaluate(&board("O________"), Player::O);
        let edge = heuristic.evaluate(&board("_O_______"), Player::O);
        // lines through each cell: 4, 3, 2
        assert_eq!((center, corner, edge), (4, 3, 2));
    }

    #[test]
    fn test_opponent_threats_weigh_more() {
        let heuristic = LineHeuristic::new(3, 3);
        let mirrored = heuristic.evaluate(&board("XX_______"), Player::O);
        let own = heuristic.evaluate(&board("OO_______"), Player::O);
        assert!(mirrored < 0);
        assert!(-mirrored > own);
    }

    #[test]
    fn test_blocked_window_scores_nothing() {
        let heuristic = LineHeuristic::new(3, 3);
        // Top row blocked; X keeps column 0 and the diagonal (-1 each), O keeps
        // column 1 (+1).
        assert_eq!(heuristic.evaluate(&board("XO_______"), Player::O), -1);
    }

    #[test]
    fn test_window_shared_by_two_opponents_is_blocked() {
        let heuristic = LineHeuristic::new(3, 3);
        // Top row holds X and Triangle: dead for everyone. Column 0, column 1
        // and the main diagonal stay open for one opponent each (-1 each).
        assert_eq!(heuristic.evaluate(&board("XT_______"), Player::O), -3);
        // The same two cells owned by one opponent keep the row open.
        assert_eq!(heuristic.evaluate(&board("XX_______"), Player::O), -18);
    }

    #[test]
    fn test_null_heuristic() {
        assert_eq!(NullHeuristic.evaluate(&board("XX_______"), Player::O), 0);
    }
}
