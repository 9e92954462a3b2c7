//! Application layer with dependency injection container.
//!
//! The container owns the storage backend and creates the AI engines and game
//! sessions that use it.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │           Application Layer (app)           │
//! │  ┌──────────────────────────────────────┐   │
//! │  │   App (DI container) / GameSession   │   │
//! │  └──────────────┬───────────────────────┘   │
//! │                 │ owns                      │
//! │                 ▼                           │
//! │  ┌──────────────────────────────────────┐   │
//! │  │  Infrastructure (adapters)           │   │
//! │  │  - MsgPackRepository                 │   │
//! │  │  - InMemoryRepository (testing)      │   │
//! │  └──────────────┬───────────────────────┘   │
//! │                 │ implements                │
//! │                 ▼                           │
//! │  ┌──────────────────────────────────────┐   │
//! │  │  Domain Ports (ports)                │   │
//! │  │  - QTableRepository trait            │   │
//! │  └──────────────┬───────────────────────┘   │
//! │                 │ used by                   │
//! │                 ▼                           │
//! │  ┌──────────────────────────────────────┐   │
//! │  │  Domain Logic                        │   │
//! │  │  - AiEngine (Q-learning, minimax)    │   │
//! │  │  - GameState, Board                  │   │
//! │  └──────────────────────────────────────┘   │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! # Usage
//!
//! ```
//! use xo_engine::app::{App, DifficultyLevel, GameConfig};
//! use xo_engine::adapters::InMemoryRepository;
//! use xo_engine::game::GameMode;
//!
//! let app = App::for_testing()
//!     .with_repository(InMemoryRepository::new())
//!     .with_default_seed(42)
//!     .build();
//!
//! let mut session = app.start_session(GameConfig::new(GameMode::Classic), DifficultyLevel::Hard)?;
//! let reply = session.play(4)?;
//! assert!(reply.is_some());
//! # Ok::<(), xo_engine::Error>(())
//! ```

pub mod config;
pub mod container;
pub mod session;

pub use config::{Difficulty, DifficultyLevel, GameConfig};
pub use container::{App, AppBuilder};
pub use session::GameSession;
