//! Repository port for Q-table persistence.
//!
//! This module defines the trait boundary between the learning core and the
//! storage that keeps learned values across sessions.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{Result, game::GameMode, q_learning::QTable};

/// Key under which one Q-table is stored.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TableHandle(String);

impl TableHandle {
    pub fn new(name: impl Into<String>) -> Self {
        TableHandle(name.into())
    }

    /// Default handle for the table learned in `mode`.
    pub fn for_mode(mode: GameMode) -> Self {
        TableHandle(format!("q_table_{mode}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TableHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Port for persisting and loading Q-tables.
///
/// This trait abstracts the storage mechanism, allowing different
/// implementations (MessagePack files, memory, ...) without coupling the
/// learning logic to a format.
///
/// # Examples
///
/// ```
/// use xo_engine::adapters::InMemoryRepository;
/// use xo_engine::ports::{QTableRepository, TableHandle};
/// use xo_engine::q_learning::QTable;
///
/// let repo = InMemoryRepository::new();
/// let handle = TableHandle::new("classic");
///
/// let mut table = QTable::new(9);
/// table.set("_________", 4, 0.5);
/// repo.save(&handle, &table)?;
///
/// assert_eq!(repo.load(&handle)?, Some(table));
/// # Ok::<(), xo_engine::Error>(())
/// ```
pub trait QTableRepository {
    /// Load the table stored under `handle`.
    ///
    /// Returns `Ok(None)` when nothing is stored.
    ///
    /// # Errors
    ///
    /// Returns an error if the stored data cannot be read or decoded.
    fn load(&self, handle: &TableHandle) -> Result<Option<QTable>>;

    /// Replace the table stored under `handle`.
    ///
    /// Implementations must not leave a partially written table behind.
    ///
    /// # Errors
    ///
    /// Returns an error if encoding or writing fails.
    fn save(&self, handle: &TableHandle, table: &QTable) -> Result<()>;

    /// Forget the table stored under `handle`; later loads behave as if it was
    /// never saved.
    ///
    /// # Errors
    ///
    /// Returns an error if the stored data cannot be removed.
    fn clear(&self, handle: &TableHandle) -> Result<()>;

    /// Load the table, falling back to an empty one.
    ///
    /// Missing, unreadable, corrupt or wrongly sized tables all yield
    /// `QTable::new(cell_count)`; problems are logged, never returned.
    fn load_or_empty(&self, handle: &TableHandle, cell_count: usize) -> QTable {
        match self.load(handle) {
            Ok(Some(table)) if table.cell_count() == cell_count => table,
            Ok(Some(table)) => {
                tracing::warn!(
                    %handle,
                    expected = cell_count,
                    found = table.cell_count(),
                    "stored q-table has the wrong size, starting empty"
                );
                QTable::new(cell_count)
            }
            Ok(None) => QTable::new(cell_count),
            Err(error) => {
                tracing::warn!(%handle, %error, "failed to load q-table, starting empty");
                QTable::new(cell_count)
            }
        }
    }
}
