//! AI façade: one entry point for move requests and post-game learning.
//!
//! [`AiEngine`] routes each request to the Q-learning agent or the minimax
//! engine depending on the [`Difficulty`]. Q-values live in a [`TableCache`]
//! loaded from the repository the first time it is needed and again only
//! after a clear. Engines handed the same cache (as [`crate::app::App`] does
//! for every engine of one mode) see and extend each other's learning.

use std::sync::{Arc, Mutex, MutexGuard};

use rand::{Rng, SeedableRng, rngs::StdRng, seq::IndexedRandom};

use crate::{
    Result,
    app::{Difficulty, GameConfig},
    game::{Board, GameMode},
    minimax::MinimaxEngine,
    ports::{QTableRepository, TableHandle},
    q_learning::{QLearningAgent, QTable},
};

/// Lazily loaded Q-table shared by the engines learning into one handle.
///
/// `None` until first use and again after a clear.
pub type TableCache = Arc<Mutex<Option<QTable>>>;

pub struct AiEngine {
    repository: Arc<dyn QTableRepository + Send + Sync>,
    handle: TableHandle,
    mode: GameMode,
    cache: TableCache,
    q_agent: QLearningAgent,
    minimax: MinimaxEngine,
    rng: StdRng,
}

impl AiEngine {
    /// Create an engine for the AI seat of `config`, persisting its table
    /// under [`TableHandle::for_mode`] through a cache of its own.
    pub fn new(repository: Arc<dyn QTableRepository + Send + Sync>, config: &GameConfig) -> Self {
        let mode = config.mode;
        let ai = config.ai_player();

        let mut q_agent = QLearningAgent::new(ai, mode.winning_length());
        let rng = match config.seed {
            Some(seed) => {
                q_agent = q_agent.with_seed(seed);
                StdRng::seed_from_u64(seed.wrapping_add(1))
            }
            None => StdRng::from_rng(&mut rand::rng()),
        };

        Self {
            repository,
            handle: TableHandle::for_mode(mode),
            mode,
            cache: TableCache::default(),
            q_agent,
            minimax: MinimaxEngine::new(
                ai,
                config.human_player(),
                mode.side(),
                mode.winning_length(),
            ),
            rng,
        }
    }

    /// Store the table under a different handle, with a fresh cache.
    pub fn with_handle(mut self, handle: TableHandle) -> Self {
        self.handle = handle;
        self.cache = TableCache::default();
        self
    }

    /// Share `cache` with other engines using the same handle.
    pub fn with_table_cache(mut self, cache: TableCache) -> Self {
        self.cache = cache;
        self
    }

    pub fn handle(&self) -> &TableHandle {
        &self.handle
    }

    /// Whether the table is currently cached.
    pub fn is_loaded(&self) -> bool {
        self.lock_cache().is_some()
    }

    /// Snapshot of the cached table, loading it on first use.
    ///
    /// Load failures yield an empty table.
    pub fn table(&self) -> QTable {
        let mut cache = self.lock_cache();
        self.loaded(&mut cache).clone()
    }

    fn lock_cache(&self) -> MutexGuard<'_, Option<QTable>> {
        self.cache
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn loaded<'a>(&self, cache: &'a mut Option<QTable>) -> &'a mut QTable {
        cache.get_or_insert_with(|| {
            self.repository
                .load_or_empty(&self.handle, self.mode.cell_count())
        })
    }

    /// Move for the AI on `board`, or `None` when no cell is free.
    ///
    /// Search difficulties run minimax and then, with probability
    /// `exploration_rate`, play a random free cell instead. Other difficulties
    /// ask the Q-learning agent with exploration `epsilon`.
    pub fn get_next_move(&mut self, board: &Board, difficulty: &Difficulty) -> Option<usize> {
        if difficulty.uses_search() {
            let best = self.minimax.best_move(board, difficulty.search_depth)?;
            if self.rng.random::<f64>() < difficulty.exploration_rate {
                let available = board.available_positions();
                let distracted = available.choose(&mut self.rng).copied();
                tracing::debug!(best, ?distracted, "minimax move replaced by a random one");
                return distracted;
            }
            return Some(best);
        }

        let cache = Arc::clone(&self.cache);
        let mut guard = cache.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        let table = self.loaded(&mut guard);
        self.q_agent
            .select_action(board, table, difficulty.epsilon)
    }

    /// Learn from a finished game's history.
    ///
    /// Ignored for search difficulties. The cache stays locked while a copy of
    /// the table is updated and saved, so concurrent engines sharing it apply
    /// their games one after another. The copy replaces the cache even if
    /// saving fails. Returns the number of Q-values updated.
    ///
    /// # Errors
    ///
    /// Returns the repository error when saving fails.
    pub fn update_memory(&mut self, history: &[Board], difficulty: &Difficulty) -> Result<usize> {
        if difficulty.uses_search() {
            return Ok(0);
        }

        let mut cache = self.lock_cache();
        let mut updated = self.loaded(&mut cache).clone();
        let updates = self.q_agent.update_memory(history, &mut updated);
        if updates == 0 {
            return Ok(0);
        }

        let saved = self.repository.save(&self.handle, &updated);
        *cache = Some(updated);
        if let Err(error) = &saved {
            tracing::warn!(handle = %self.handle, %error, "failed to save q-table");
        }
        saved.map(|()| updates)
    }

    /// Forget everything learned: clears the stored table and drops the cache.
    ///
    /// # Errors
    ///
    /// Returns the repository error when clearing fails; the cache is dropped
    /// regardless.
    pub fn clear_memory(&mut self) -> Result<()> {
        let mut cache = self.lock_cache();
        *cache = None;
        self.repository.clear(&self.handle).inspect_err(|error| {
            tracing::warn!(handle = %self.handle, %error, "failed to clear q-table");
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        adapters::InMemoryRepository,
        app::DifficultyLevel,
        game::{GameMode, Player},
    };

    fn engine(repo: &InMemoryRepository, mode: GameMode) -> AiEngine {
        AiEngine::new(
            Arc::new(repo.clone()),
            &GameConfig::new(mode).with_seed(42),
        )
    }

    fn board(s: &str) -> Board {
        Board::from_state_string(s).unwrap()
    }

    #[test]
    fn test_table_is_loaded_lazily_once() {
        let repo = InMemoryRepository::new();
        let mut ai = engine(&repo, GameMode::Classic);
        assert!(!ai.is_loaded());

        let greedy = Difficulty::q_learning(0.0).unwrap();
        ai.get_next_move(&Board::new(3).unwrap(), &greedy);
        assert!(ai.is_loaded());

        // Writes behind the engine's back are not seen until a clear.
        let mut table = QTable::new(9);
        table.set("_________", 8, 1.0);
        repo.save(ai.handle(), &table).unwrap();
        assert_eq!(ai.get_next_move(&Board::new(3).unwrap(), &greedy), Some(0));
    }

    #[test]
    fn test_minimax_route_ignores_learning() {
        let repo = InMemoryRepository::new();
        let mut ai = engine(&repo, GameMode::Large);
        let hard = Difficulty::preset(DifficultyLevel::Hard, GameMode::Large);

        assert_eq!(ai.get_next_move(&Board::new(9).unwrap(), &hard), Some(40));

        let history = vec![
            Board::new(9).unwrap(),
            Board::new(9).unwrap().simulate_move(0, Player::X),
            Board::new(9)
                .unwrap()
                .simulate_move(0, Player::X)
                .simulate_move(40, Player::O),
        ];
        assert_eq!(ai.update_memory(&history, &hard).unwrap(), 0);
        assert_eq!(repo.count(), 0);
        assert!(!ai.is_loaded());
    }

    #[test]
    fn test_full_distraction_plays_random_legal_move() {
        let repo = InMemoryRepository::new();
        let mut ai = engine(&repo, GameMode::Classic);
        let distracted = Difficulty::minimax(2, 1.0).unwrap();
        let b = board("XOX_O_X__");
        for _ in 0..20 {
            let mv = ai.get_next_move(&b, &distracted).unwrap();
            assert!(b.is_position_available(mv));
        }
    }

    #[test]
    fn test_update_memory_persists_and_refreshes_cache() {
        let repo = InMemoryRepository::new();
        let mut ai = engine(&repo, GameMode::Classic);
        let greedy = Difficulty::q_learning(0.0).unwrap();

        let history = vec![board("XX__O____"), board("XX__O___O"), board("XXX_O___O")];
        assert_eq!(ai.update_memory(&history, &greedy).unwrap(), 1);

        let stored = repo.load(ai.handle()).unwrap().unwrap();
        assert!(stored.get("XX__O____", 8) < 0.0);
        assert_eq!(ai.table(), stored);
    }

    #[test]
    fn test_clear_memory_drops_cache_and_storage() {
        let repo = InMemoryRepository::new();
        let mut ai = engine(&repo, GameMode::Classic);
        let greedy = Difficulty::q_learning(0.0).unwrap();

        let history = vec![board("XX__O____"), board("XX__O___O"), board("XXX_O___O")];
        ai.update_memory(&history, &greedy).unwrap();
        assert!(repo.contains(ai.handle()));

        ai.clear_memory().unwrap();
        assert!(!ai.is_loaded());
        assert!(!repo.contains(ai.handle()));
        assert!(ai.table().is_empty());
    }
}
