//! Board representation and basic operations

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{GameResult, lines::LineAnalyzer};

/// A cell on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    Empty,
    X,
    O,
    Triangle,
    Square,
}

impl Cell {
    /// Canonical character used in state strings.
    pub fn to_char(self) -> char {
        match self {
            Cell::Empty => '_',
            Cell::X => 'X',
            Cell::O => 'O',
            Cell::Triangle => 'T',
            Cell::Square => 'S',
        }
    }

    pub fn from_char(c: char) -> Option<Cell> {
        match c {
            '_' | '.' | ' ' => Some(Cell::Empty),
            'X' | 'x' => Some(Cell::X),
            'O' | 'o' | '0' => Some(Cell::O),
            'T' | 't' => Some(Cell::Triangle),
            'S' | 's' => Some(Cell::Square),
            _ => None,
        }
    }

    /// The player owning this cell, if any.
    pub fn to_player(self) -> Option<Player> {
        match self {
            Cell::Empty => None,
            Cell::X => Some(Player::X),
            Cell::O => Some(Player::O),
            Cell::Triangle => Some(Player::Triangle),
            Cell::Square => Some(Player::Square),
        }
    }
}

/// A player mark
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    X,
    O,
    Triangle,
    Square,
}

impl Player {
    /// Every mark, in seating order.
    pub const ALL: [Player; 4] = [Player::X, Player::O, Player::Triangle, Player::Square];

    /// Convert player to cell
    pub fn to_cell(self) -> Cell {
        match self {
            Player::X => Cell::X,
            Player::O => Cell::O,
            Player::Triangle => Cell::Triangle,
            Player::Square => Cell::Square,
        }
    }

    pub fn symbol(self) -> char {
        self.to_cell().to_char()
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Immutable square grid of cells.
///
/// Boards are values: moves are simulated by producing a new board, the
/// original is never touched.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board {
    cells: Vec<Cell>,
    side: usize,
}

#[allow(clippy::len_without_is_empty)]
impl Board {
    /// Create an empty `side`×`side` board.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidBoardLength`] when `side` is zero.
    pub fn new(side: usize) -> Result<Self, crate::Error> {
        if side == 0 {
            return Err(crate::Error::InvalidBoardLength { len: 0 });
        }
        Ok(Board {
            cells: vec![Cell::Empty; side * side],
            side,
        })
    }

    /// Build a board from its cells.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidBoardLength`] unless the cell count is a
    /// non-zero perfect square.
    pub fn from_cells(cells: Vec<Cell>) -> Result<Self, crate::Error> {
        let len = cells.len();
        let side = len.isqrt();
        if len == 0 || side * side != len {
            return Err(crate::Error::InvalidBoardLength { len });
        }
        Ok(Board { cells, side })
    }

    /// Parse a board from a state string such as `"XO_______"`.
    ///
    /// Line breaks are skipped, so the output of `Display` parses back. `.`
    /// and space are accepted for empty cells in addition to `_`.
    ///
    /// # Errors
    ///
    /// Returns an error on unknown characters or a non-square cell count.
    pub fn from_state_string(s: &str) -> Result<Self, crate::Error> {
        let cells = s
            .chars()
            .filter(|c| *c != '\n' && *c != '\r')
            .enumerate()
            .map(|(position, character)| {
                Cell::from_char(character).ok_or_else(|| crate::Error::InvalidCellCharacter {
                    character,
                    position,
                    context: s.to_string(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::from_cells(cells)
    }

    pub fn side(&self) -> usize {
        self.side
    }

    /// Number of cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether no cell holds a mark yet.
    pub fn has_no_marks(&self) -> bool {
        self.cells.iter().all(|c| *c == Cell::Empty)
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn get(&self, pos: usize) -> Option<Cell> {
        self.cells.get(pos).copied()
    }

    /// Index of the central cell.
    pub fn center(&self) -> usize {
        self.cells.len() / 2
    }

    /// True iff `pos` is on the board and empty.
    pub fn is_position_available(&self, pos: usize) -> bool {
        self.cells.get(pos) == Some(&Cell::Empty)
    }

    /// All empty positions in ascending order.
    pub fn available_positions(&self) -> Vec<usize> {
        self.cells
            .iter()
            .enumerate()
            .filter(|&(_, &cell)| cell == Cell::Empty)
            .map(|(i, _)| i)
            .collect()
    }

    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|c| **c != Cell::Empty).count()
    }

    pub fn is_full(&self) -> bool {
        !self.cells.contains(&Cell::Empty)
    }

    /// Place `player` at `pos` on a copy of this board.
    ///
    /// Occupancy is not checked. Panics when `pos` is off the board; use
    /// [`Board::try_simulate_move`] for untrusted input.
    #[must_use = "simulate_move returns a new board; the original is unchanged"]
    pub fn simulate_move(&self, pos: usize, player: Player) -> Board {
        assert!(
            pos < self.cells.len(),
            "position {pos} is outside a board of {} cells",
            self.cells.len()
        );
        let mut next = self.clone();
        next.cells[pos] = player.to_cell();
        next
    }

    /// Checked variant of [`Board::simulate_move`].
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::PositionOutOfRange`] when `pos` is off the board.
    pub fn try_simulate_move(&self, pos: usize, player: Player) -> Result<Board, crate::Error> {
        if pos >= self.cells.len() {
            return Err(crate::Error::PositionOutOfRange {
                position: pos,
                cells: self.cells.len(),
            });
        }
        Ok(self.simulate_move(pos, player))
    }

    /// Canonical state string, one character per cell in index order.
    ///
    /// This is the key into the Q-table.
    pub fn to_state_string(&self) -> String {
        self.cells.iter().map(|c| c.to_char()).collect()
    }

    /// Result of the position for a given required run length.
    pub fn check_game_result(&self, winning_length: usize) -> GameResult {
        if let Some((winner, line)) =
            LineAnalyzer::find_winning_line(&self.cells, self.side, winning_length)
        {
            GameResult::Win { winner, line }
        } else if self.is_full() {
            GameResult::Draw
        } else {
            GameResult::Playing
        }
    }

    /// Winning line that passes through `pos`, if any.
    pub fn winning_line_through(
        &self,
        pos: usize,
        winning_length: usize,
    ) -> Option<(Player, Vec<usize>)> {
        LineAnalyzer::winning_line_through(&self.cells, self.side, pos, winning_length)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(self.side) {
            let line: String = row.iter().map(|c| c.to_char()).collect();
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}
