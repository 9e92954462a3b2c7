//! Line scanning on square grids

use super::{Cell, Player};

/// Scan directions, in the fixed order used for win detection: →, ↓, ↘, ↙.
pub const DIRECTIONS: [(isize, isize); 4] = [(0, 1), (1, 0), (1, 1), (1, -1)];

/// Move one step from `pos` in `direction`, or `None` when leaving the grid.
fn step(side: usize, pos: usize, (dr, dc): (isize, isize)) -> Option<usize> {
    let row = (pos / side) as isize + dr;
    let col = (pos % side) as isize + dc;
    let side = side as isize;
    if row < 0 || col < 0 || row >= side || col >= side {
        None
    } else {
        Some((row * side + col) as usize)
    }
}

/// Indices of the `length` cells starting at `start` in `direction`.
///
/// Returns `None` when the line would leave the grid.
pub fn line_indices(
    side: usize,
    start: usize,
    direction: (isize, isize),
    length: usize,
) -> Option<Vec<usize>> {
    let mut line = Vec::with_capacity(length);
    let mut pos = start;
    line.push(pos);
    for _ in 1..length {
        pos = step(side, pos, direction)?;
        line.push(pos);
    }
    Some(line)
}

/// Every line of `length` cells on a `side`×`side` grid.
///
/// Ordered by start cell (row-major), then by [`DIRECTIONS`].
pub fn all_lines(side: usize, length: usize) -> Vec<Vec<usize>> {
    let mut lines = Vec::new();
    if length == 0 {
        return lines;
    }
    for start in 0..side * side {
        for direction in DIRECTIONS {
            if let Some(line) = line_indices(side, start, direction, length) {
                lines.push(line);
            }
        }
    }
    lines
}

/// Utility for finding completed lines
pub struct LineAnalyzer;

impl LineAnalyzer {
    /// First winning line under the row-major / fixed-direction scan order.
    pub fn find_winning_line(
        cells: &[Cell],
        side: usize,
        length: usize,
    ) -> Option<(Player, Vec<usize>)> {
        if length == 0 {
            return None;
        }
        for start in 0..cells.len() {
            let Some(player) = cells[start].to_player() else {
                continue;
            };
            for direction in DIRECTIONS {
                if Self::run_length(cells, side, start, direction, length) == length {
                    if let Some(line) = line_indices(side, start, direction, length) {
                        return Some((player, line));
                    }
                }
            }
        }
        None
    }

    /// A winning line passing through `pos`, if the mark there completes one.
    pub fn winning_line_through(
        cells: &[Cell],
        side: usize,
        pos: usize,
        length: usize,
    ) -> Option<(Player, Vec<usize>)> {
        let player = cells.get(pos)?.to_player()?;
        if length == 0 {
            return None;
        }
        for (dr, dc) in DIRECTIONS {
            let backwards = (-dr, -dc);
            let mut start = pos;
            while let Some(prev) = step(side, start, backwards) {
                if cells[prev] != cells[pos] {
                    break;
                }
                start = prev;
            }
            if Self::run_length(cells, side, start, (dr, dc), usize::MAX) >= length {
                return line_indices(side, start, (dr, dc), length).map(|line| (player, line));
            }
        }
        None
    }

    /// Number of consecutive cells equal to `cells[start]`, capped at `limit`.
    fn run_length(
        cells: &[Cell],
        side: usize,
        start: usize,
        direction: (isize, isize),
        limit: usize,
    ) -> usize {
        let target = cells[start];
        let mut count = 1;
        let mut pos = start;
        while count < limit {
            match step(side, pos, direction) {
                Some(next) if cells[next] == target => {
                    count += 1;
                    pos = next;
                }
                _ => break,
            }
        }
        count
    }
}
