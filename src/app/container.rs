//! Dependency injection container for the game application.
//!
//! The container owns the Q-table repository and hands it to every engine it
//! creates, so sessions, training runs and the CLI all share one storage
//! backend. Engines of the same mode also share one cached table, so several
//! live sessions learn into it one game at a time instead of overwriting each
//! other's saves.

use std::{
    collections::HashMap,
    path::PathBuf,
    sync::{Arc, Mutex},
};

use super::{
    config::{Difficulty, DifficultyLevel, GameConfig},
    session::GameSession,
};
use crate::{
    Result,
    adapters::{InMemoryRepository, MsgPackRepository},
    engine::{AiEngine, TableCache},
    game::GameMode,
    ports::{QTableRepository, TableHandle},
};

/// Application with dependency injection.
///
/// # Examples
///
/// ## Production usage
///
/// ```no_run
/// use xo_engine::app::{App, DifficultyLevel, GameConfig};
/// use xo_engine::game::GameMode;
///
/// let app = App::new("memory");
/// let mut session = app.start_session(GameConfig::new(GameMode::Classic), DifficultyLevel::Hard)?;
/// let reply = session.play(4)?;
/// # Ok::<(), xo_engine::Error>(())
/// ```
///
/// ## Testing with dependency injection
///
/// ```
/// use xo_engine::app::App;
/// use xo_engine::adapters::InMemoryRepository;
///
/// let app = App::for_testing()
///     .with_repository(InMemoryRepository::new())
///     .with_default_seed(42)
///     .build();
/// ```
pub struct App {
    repository: Arc<dyn QTableRepository + Send + Sync>,
    /// Default random seed (None = non-deterministic)
    default_seed: Option<u64>,
    /// One shared cache per stored table
    tables: Mutex<HashMap<TableHandle, TableCache>>,
}

impl App {
    /// Create an app storing Q-tables as MessagePack files under `dir`.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            repository: Arc::new(MsgPackRepository::new(dir)),
            default_seed: None,
            tables: Mutex::default(),
        }
    }

    /// Create a builder for constructing an app with custom dependencies.
    pub fn for_testing() -> AppBuilder {
        AppBuilder::new()
    }

    /// Get the Q-table repository.
    pub fn repository(&self) -> Arc<dyn QTableRepository + Send + Sync> {
        Arc::clone(&self.repository)
    }

    pub fn default_seed(&self) -> Option<u64> {
        self.default_seed
    }

    /// Shared cache for the table stored under `handle`.
    pub fn table_cache(&self, handle: &TableHandle) -> TableCache {
        let mut tables = self
            .tables
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        Arc::clone(tables.entry(handle.clone()).or_default())
    }

    /// Create an AI engine for `config`.
    ///
    /// The config's seed wins over the app default. Every engine of one mode
    /// shares that mode's cached table.
    pub fn create_engine(&self, config: &GameConfig) -> AiEngine {
        let mut config = config.clone();
        config.seed = config.seed.or(self.default_seed);
        let engine = AiEngine::new(self.repository(), &config);
        let cache = self.table_cache(engine.handle());
        engine.with_table_cache(cache)
    }

    /// Start a game at a named difficulty.
    ///
    /// # Errors
    ///
    /// Returns an error for an invalid player count.
    pub fn start_session(&self, config: GameConfig, level: DifficultyLevel) -> Result<GameSession> {
        let difficulty = Difficulty::preset(level, config.mode);
        self.start_session_with(config, difficulty)
    }

    /// Start a game with explicit difficulty parameters.
    ///
    /// # Errors
    ///
    /// Returns an error for an invalid player count.
    pub fn start_session_with(&self, config: GameConfig, difficulty: Difficulty) -> Result<GameSession> {
        let engine = config.ai_enabled.then(|| self.create_engine(&config));
        GameSession::new(config, difficulty, engine)
    }

    /// Forget what was learned for `mode`, in storage and in the shared cache.
    ///
    /// # Errors
    ///
    /// Returns the repository error when the stored table cannot be removed.
    pub fn clear_memory(&self, mode: GameMode) -> Result<()> {
        let handle = TableHandle::for_mode(mode);
        tracing::info!(%handle, "clearing learned table");
        let cache = self.table_cache(&handle);
        let mut cached = cache.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        *cached = None;
        self.repository.clear(&handle)
    }
}

/// Builder for constructing an app with custom dependencies.
///
/// Primarily used for testing to inject in-memory storage and control randomness.
pub struct AppBuilder {
    repository: Option<Arc<dyn QTableRepository + Send + Sync>>,
    default_seed: Option<u64>,
}

impl AppBuilder {
    pub fn new() -> Self {
        Self {
            repository: None,
            default_seed: None,
        }
    }

    /// Set a custom Q-table repository.
    pub fn with_repository<R: QTableRepository + Send + Sync + 'static>(mut self, repo: R) -> Self {
        self.repository = Some(Arc::new(repo));
        self
    }

    /// Set a default random seed for every engine created by this app.
    pub fn with_default_seed(mut self, seed: u64) -> Self {
        self.default_seed = Some(seed);
        self
    }

    /// Build the app with the configured dependencies.
    ///
    /// If no repository was specified, a fresh `InMemoryRepository` is used.
    pub fn build(self) -> App {
        App {
            repository: self
                .repository
                .unwrap_or_else(|| Arc::new(InMemoryRepository::new())),
            default_seed: self.default_seed,
            tables: Mutex::default(),
        }
    }
}

impl Default for AppBuilder {
    fn default() -> Self {
        Self::new()
    }
}
