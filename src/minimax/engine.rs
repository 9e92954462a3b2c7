//! Depth-limited minimax with alpha-beta pruning

use crate::game::{Board, Player};

use super::heuristic::{Heuristic, LineHeuristic};

/// Value of a decided game, before the depth bonus.
///
/// Larger than any heuristic score so that decided lines always dominate.
pub const WIN_SCORE: i64 = 1_000_000_000;

/// Counters collected during one search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Positions visited below the root
    pub nodes: u64,
    /// Sibling loops cut short by alpha-beta
    pub cutoffs: u64,
}

/// Stateless adversarial search for one mark against one opponent mark.
pub struct MinimaxEngine {
    player: Player,
    opponent: Player,
    winning_length: usize,
    heuristic: Box<dyn Heuristic>,
}

impl MinimaxEngine {
    /// Create an engine searching for `player` on `side`×`side` boards, using
    /// the default [`LineHeuristic`].
    pub fn new(player: Player, opponent: Player, side: usize, winning_length: usize) -> Self {
        Self {
            player,
            opponent,
            winning_length,
            heuristic: Box::new(LineHeuristic::new(side, winning_length)),
        }
    }

    pub fn with_heuristic(mut self, heuristic: Box<dyn Heuristic>) -> Self {
        self.heuristic = heuristic;
        self
    }

    pub fn player(&self) -> Player {
        self.player
    }

    pub fn opponent(&self) -> Player {
        self.opponent
    }

    /// Best move for the engine's player looking `depth` plies ahead.
    ///
    /// An empty board is answered with the center cell without searching.
    /// Ties keep the lowest index. Returns `None` when no cell is free.
    pub fn best_move(&self, board: &Board, depth: u8) -> Option<usize> {
        self.best_move_with_stats(board, depth).0
    }

    /// [`MinimaxEngine::best_move`] plus search counters.
    pub fn best_move_with_stats(&self, board: &Board, depth: u8) -> (Option<usize>, SearchStats) {
        let mut stats = SearchStats::default();
        let available = board.available_positions();
        if available.is_empty() {
            return (None, stats);
        }
        if board.occupied_count() == 0 {
            return (Some(board.center()), stats);
        }

        let mut best_score = i64::MIN;
        let mut best_move = None;
        for &pos in &available {
            let child = board.simulate_move(pos, self.player);
            let score = self.minimax(
                &child,
                Some(pos),
                depth.saturating_sub(1),
                false,
                i64::MIN,
                i64::MAX,
                &mut stats,
            );
            if score > best_score {
                best_score = score;
                best_move = Some(pos);
            }
        }

        tracing::trace!(
            depth,
            nodes = stats.nodes,
            cutoffs = stats.cutoffs,
            best_score,
            "minimax search finished"
        );
        (best_move.or(available.first().copied()), stats)
    }

    /// Minimax value of `board` for the engine's player.
    ///
    /// `last_move` is the cell filled to reach `board`; when given, only lines
    /// through it are checked for a win, which is enough as long as the
    /// previous position was undecided.
    #[allow(clippy::too_many_arguments)]
    pub fn minimax(
        &self,
        board: &Board,
        last_move: Option<usize>,
        depth: u8,
        maximizing: bool,
        mut alpha: i64,
        mut beta: i64,
        stats: &mut SearchStats,
    ) -> i64 {
        stats.nodes += 1;

        if let Some(score) = self.terminal_score(board, last_move, depth) {
            return score;
        }
        if depth == 0 {
            return self.heuristic.evaluate(board, self.player);
        }

        let mover = if maximizing { self.player } else { self.opponent };
        let mut best = if maximizing { i64::MIN } else { i64::MAX };

        for pos in board.available_positions() {
            let child = board.simulate_move(pos, mover);
            let score = self.minimax(&child, Some(pos), depth - 1, !maximizing, alpha, beta, stats);
            if maximizing {
                best = best.max(score);
                alpha = alpha.max(score);
            } else {
                best = best.min(score);
                beta = beta.min(score);
            }
            if beta <= alpha {
                stats.cutoffs += 1;
                break;
            }
        }

        best
    }

    /// Score of a decided position, `None` while still playing.
    ///
    /// Quicker wins score higher and slower losses score less negative.
    fn terminal_score(&self, board: &Board, last_move: Option<usize>, depth: u8) -> Option<i64> {
        let winner = match last_move {
            Some(pos) => board
                .winning_line_through(pos, self.winning_length)
                .map(|(winner, _)| winner),
            None => board.check_game_result(self.winning_length).winner(),
        };

        match winner {
            Some(winner) if winner == self.player => Some(WIN_SCORE + i64::from(depth)),
            Some(_) => Some(-WIN_SCORE - i64::from(depth)),
            None if board.is_full() => Some(0),
            None => None,
        }
    }
}
