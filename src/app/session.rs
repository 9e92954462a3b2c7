//! One game between humans and (optionally) the AI.

use crate::{
    Result,
    engine::AiEngine,
    error::Error,
    game::{GameState, Player},
};

use super::config::{Difficulty, GameConfig};

/// An explicitly owned game session.
///
/// Human moves go through [`GameSession::play`]; when that hands the turn to
/// the AI, its reply is requested and applied before returning. Once the game
/// is decided the history is handed to the engine for learning, exactly once.
pub struct GameSession {
    config: GameConfig,
    difficulty: Difficulty,
    state: GameState,
    engine: Option<AiEngine>,
    learned: bool,
}

impl GameSession {
    /// Start a session. `engine` is ignored when the AI is disabled.
    ///
    /// # Errors
    ///
    /// Returns an error for an invalid player count.
    pub fn new(config: GameConfig, difficulty: Difficulty, engine: Option<AiEngine>) -> Result<Self> {
        let state = GameState::new(config.mode.side(), config.players()?)?;
        let engine = if config.ai_enabled { engine } else { None };
        Ok(Self {
            config,
            difficulty,
            state,
            engine,
            learned: false,
        })
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn difficulty(&self) -> &Difficulty {
        &self.difficulty
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn engine_mut(&mut self) -> Option<&mut AiEngine> {
        self.engine.as_mut()
    }

    /// Whether `player` is controlled by the AI in this session.
    pub fn is_ai(&self, player: Player) -> bool {
        self.engine.is_some() && player == self.config.ai_player()
    }

    /// Play a human move for the player whose turn it is.
    ///
    /// Returns the AI's reply, if it moved.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfTurn`] when the AI is to move, or the rejection
    /// from [`GameState::play`]. The state is unchanged on error.
    pub fn play(&mut self, position: usize) -> Result<Option<usize>> {
        let player = self.state.current_player();
        if self.is_ai(player) && !self.state.is_finished() {
            return Err(Error::OutOfTurn { player });
        }

        self.state
            .play(position, player, self.config.mode.winning_length())?;
        if self.state.is_finished() {
            self.notify_game_ended();
            return Ok(None);
        }

        if self.is_ai(self.state.current_player()) {
            self.request_ai_move()
        } else {
            Ok(None)
        }
    }

    /// Ask the AI for its move and apply it.
    ///
    /// Returns `Ok(None)` when there is no AI or no free cell.
    ///
    /// # Errors
    ///
    /// Returns [`Error::GameOver`] for a finished game and [`Error::OutOfTurn`]
    /// when it is a human's turn.
    pub fn request_ai_move(&mut self) -> Result<Option<usize>> {
        if self.state.is_finished() {
            return Err(Error::GameOver);
        }
        let player = self.state.current_player();
        let Some(engine) = self.engine.as_mut() else {
            return Ok(None);
        };
        if player != self.config.ai_player() {
            return Err(Error::OutOfTurn { player });
        }

        let Some(position) = engine.get_next_move(self.state.board(), &self.difficulty) else {
            return Ok(None);
        };
        self.state
            .play(position, player, self.config.mode.winning_length())?;
        if self.state.is_finished() {
            self.notify_game_ended();
        }
        Ok(Some(position))
    }

    /// Hand the finished game's history to the engine.
    ///
    /// Only the first call after a game ends does anything. Learning failures
    /// are logged and otherwise ignored.
    pub fn notify_game_ended(&mut self) {
        if self.learned || !self.state.is_finished() {
            return;
        }
        self.learned = true;

        let Some(engine) = self.engine.as_mut() else {
            return;
        };
        match engine.update_memory(self.state.history(), &self.difficulty) {
            Ok(updates) => tracing::debug!(updates, "game history learned"),
            Err(error) => tracing::warn!(%error, "learning from finished game failed"),
        }
    }

    /// Start a fresh game with the same configuration and engine.
    pub fn restart(&mut self) -> Result<()> {
        self.state = GameState::new(self.config.mode.side(), self.config.players()?)?;
        self.learned = false;
        Ok(())
    }
}
