//! In-memory Q-table repository.
//!
//! This adapter keeps encoded tables in memory, enabling fast tests and
//! throwaway sessions without any file system I/O.

use std::{
    collections::HashMap,
    sync::{Arc, Mutex, MutexGuard},
};

use crate::{
    Result,
    ports::{QTableRepository, TableHandle},
    q_learning::{QTable, decode_table, encode_table},
};

/// In-memory repository.
///
/// Tables are stored in the same encoded form the file adapter writes, so
/// decoding failures can be exercised too.
///
/// # Thread Safety
///
/// Clones share the same underlying storage; access is serialized by a mutex.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    storage: Arc<Mutex<HashMap<String, Vec<u8>>>>,
}

impl InMemoryRepository {
    /// Create a new empty in-memory repository.
    pub fn new() -> Self {
        Self::default()
    }

    fn storage(&self) -> MutexGuard<'_, HashMap<String, Vec<u8>>> {
        self.storage
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Number of tables currently stored.
    pub fn count(&self) -> usize {
        self.storage().len()
    }

    /// Remove every stored table.
    pub fn clear_all(&self) {
        self.storage().clear();
    }

    pub fn contains(&self, handle: &TableHandle) -> bool {
        self.storage().contains_key(handle.as_str())
    }

    /// Store raw bytes under `handle`, bypassing encoding.
    pub fn insert_raw(&self, handle: &TableHandle, bytes: Vec<u8>) {
        self.storage().insert(handle.as_str().to_string(), bytes);
    }
}

impl QTableRepository for InMemoryRepository {
    fn load(&self, handle: &TableHandle) -> Result<Option<QTable>> {
        let storage = self.storage();
        storage
            .get(handle.as_str())
            .map(|bytes| decode_table(bytes))
            .transpose()
    }

    fn save(&self, handle: &TableHandle, table: &QTable) -> Result<()> {
        let bytes = encode_table(table)?;
        self.storage().insert(handle.as_str().to_string(), bytes);
        Ok(())
    }

    fn clear(&self, handle: &TableHandle) -> Result<()> {
        self.storage().remove(handle.as_str());
        Ok(())
    }
}
