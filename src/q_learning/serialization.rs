//! Saved form of a Q-table.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::{Result, error::Error, q_learning::q_table::QTable};

/// Versioned, self-describing snapshot of a [`QTable`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavedQTable {
    pub version: u32,
    pub cell_count: usize,
    pub entries: HashMap<String, Vec<f64>>,
}

impl SavedQTable {
    pub const VERSION: u32 = 1;

    pub fn from_table(table: &QTable) -> Self {
        Self {
            version: Self::VERSION,
            cell_count: table.cell_count(),
            entries: table
                .iter()
                .map(|(state, row)| (state.clone(), row.clone()))
                .collect(),
        }
    }

    /// Rebuild the table.
    ///
    /// Rows whose length does not match `cell_count` are dropped.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedTableVersion`] for snapshots written by a
    /// different format version.
    pub fn into_table(self) -> Result<QTable> {
        if self.version != Self::VERSION {
            return Err(Error::UnsupportedTableVersion {
                found: self.version,
                expected: Self::VERSION,
            });
        }

        let mut table = QTable::new(self.cell_count);
        let mut dropped = 0usize;
        for (state, row) in self.entries {
            if state.chars().count() != self.cell_count || !table.insert_row(state, row) {
                dropped += 1;
            }
        }
        if dropped > 0 {
            tracing::warn!(dropped, "discarded malformed q-table rows");
        }
        Ok(table)
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        rmp_serde::to_vec_named(self).map_err(|e| Error::SerializationContext {
            operation: "serialize q-table to MessagePack".to_string(),
            message: e.to_string(),
        })
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        rmp_serde::from_slice(bytes).map_err(|e| Error::SerializationContext {
            operation: "deserialize q-table from MessagePack".to_string(),
            message: e.to_string(),
        })
    }
}

/// Encode a table in the current saved format.
pub fn encode_table(table: &QTable) -> Result<Vec<u8>> {
    SavedQTable::from_table(table).to_bytes()
}

/// Decode a table written by [`encode_table`].
pub fn decode_table(bytes: &[u8]) -> Result<QTable> {
    SavedQTable::from_bytes(bytes)?.into_table()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_roundtrip() -> Result<()> {
        let mut table = QTable::new(9);
        table.set("X________", 4, 0.25);
        table.set("XO_______", 8, -0.5);

        let restored = decode_table(&encode_table(&table)?)?;
        assert_eq!(restored, table);
        Ok(())
    }

    #[test]
    fn test_rejects_other_versions() {
        let saved = SavedQTable {
            version: 99,
            cell_count: 9,
            entries: HashMap::new(),
        };
        let bytes = saved.to_bytes().unwrap();
        assert!(matches!(
            decode_table(&bytes),
            Err(Error::UnsupportedTableVersion {
                found: 99,
                expected: 1
            })
        ));
    }

    #[test]
    fn test_drops_rows_of_wrong_length() -> Result<()> {
        let mut entries = HashMap::new();
        entries.insert("_________".to_string(), vec![0.5; 9]);
        entries.insert("____".to_string(), vec![0.5; 4]);
        entries.insert("X________".to_string(), vec![0.5; 3]);
        let saved = SavedQTable {
            version: SavedQTable::VERSION,
            cell_count: 9,
            entries,
        };

        let table = saved.into_table()?;
        assert_eq!(table.size(), 1);
        assert_eq!(table.get("_________", 0), 0.5);
        Ok(())
    }

    #[test]
    fn test_garbage_bytes_fail_to_decode() {
        assert!(decode_table(b"not a table").is_err());
    }
}
