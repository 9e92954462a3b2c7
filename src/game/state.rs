//! Turn sequencing and move history

use serde::{Deserialize, Serialize};

use super::{Board, GameMode, GameResult, Player};

/// A move in the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub position: usize,
    pub player: Player,
}

/// A game in progress with its full board history.
///
/// `history` holds one board per ply, starting with the empty board, so its
/// last entry is always the current board.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    board: Board,
    current_player: Player,
    result: GameResult,
    history: Vec<Board>,
    active_players: Vec<Player>,
}

impl GameState {
    /// Start a game on an empty `side`×`side` board.
    ///
    /// The first entry of `players` moves first.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidPlayerCount`] unless there are 2 to 4
    /// distinct players, or an error for a zero-sized board.
    pub fn new(side: usize, players: Vec<Player>) -> Result<Self, crate::Error> {
        let distinct = players
            .iter()
            .enumerate()
            .all(|(i, p)| !players[..i].contains(p));
        if !(2..=4).contains(&players.len()) || !distinct {
            return Err(crate::Error::InvalidPlayerCount {
                count: players.len(),
            });
        }

        let board = Board::new(side)?;
        Ok(GameState {
            current_player: players[0],
            result: GameResult::Playing,
            history: vec![board.clone()],
            board,
            active_players: players,
        })
    }

    /// Start a game for `mode` seating the first `player_count` marks.
    pub fn for_mode(mode: GameMode, player_count: usize) -> Result<Self, crate::Error> {
        let players = Player::ALL.iter().copied().take(player_count).collect();
        if player_count > Player::ALL.len() {
            return Err(crate::Error::InvalidPlayerCount {
                count: player_count,
            });
        }
        Self::new(mode.side(), players)
    }

    /// Place `player` at `position` and advance the turn.
    ///
    /// Rejected moves leave the state untouched.
    ///
    /// # Errors
    ///
    /// - [`crate::Error::GameOver`] if the game is already decided
    /// - [`crate::Error::IllegalMove`] if `position` is off the board or occupied
    /// - [`crate::Error::InactivePlayer`] if `player` is not seated in this game
    pub fn play(
        &mut self,
        position: usize,
        player: Player,
        winning_length: usize,
    ) -> Result<&GameResult, crate::Error> {
        if self.result.is_finished() {
            return Err(crate::Error::GameOver);
        }
        if !self.board.is_position_available(position) {
            return Err(crate::Error::IllegalMove { position });
        }
        let seat = self
            .active_players
            .iter()
            .position(|p| *p == player)
            .ok_or(crate::Error::InactivePlayer { player })?;

        let board = self.board.simulate_move(position, player);
        let result = board.check_game_result(winning_length);

        self.current_player = if result.is_finished() {
            player
        } else {
            self.active_players[(seat + 1) % self.active_players.len()]
        };
        self.history.push(board.clone());
        self.board = board;
        self.result = result;

        Ok(&self.result)
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Player to move, or the last mover once the game is finished.
    pub fn current_player(&self) -> Player {
        self.current_player
    }

    pub fn result(&self) -> &GameResult {
        &self.result
    }

    pub fn is_finished(&self) -> bool {
        self.result.is_finished()
    }

    pub fn history(&self) -> &[Board] {
        &self.history
    }

    pub fn active_players(&self) -> &[Player] {
        &self.active_players
    }

    /// Moves played so far, recovered from consecutive history entries.
    pub fn moves(&self) -> Vec<Move> {
        self.history
            .windows(2)
            .filter_map(|pair| {
                pair[0]
                    .cells()
                    .iter()
                    .zip(pair[1].cells())
                    .position(|(before, after)| before != after)
                    .and_then(|position| {
                        pair[1].cells()[position]
                            .to_player()
                            .map(|player| Move { position, player })
                    })
            })
            .collect()
    }
}
