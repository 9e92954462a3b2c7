//! Adapters implementing domain ports.
//!
//! Storage backends for the [`crate::ports::QTableRepository`] port.

pub mod in_memory_repository;
pub mod msgpack_repository;

pub use in_memory_repository::InMemoryRepository;
pub use msgpack_repository::MsgPackRepository;
