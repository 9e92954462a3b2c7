//! MessagePack implementation of the Q-table repository.
//!
//! One file per table handle, written through a temporary file and renamed
//! into place so readers never see a half-written table.

use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use crate::{
    Result,
    error::Error,
    ports::{QTableRepository, TableHandle},
    q_learning::{QTable, decode_table, encode_table},
};

/// MessagePack-based Q-table repository rooted at a directory.
///
/// # Examples
///
/// ```no_run
/// use xo_engine::adapters::MsgPackRepository;
/// use xo_engine::ports::{QTableRepository, TableHandle};
/// use xo_engine::q_learning::QTable;
///
/// let repo = MsgPackRepository::new("memory");
/// let handle = TableHandle::new("classic");
/// repo.save(&handle, &QTable::new(9))?;
/// let loaded = repo.load(&handle)?;
/// # Ok::<(), xo_engine::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct MsgPackRepository {
    dir: PathBuf,
}

impl MsgPackRepository {
    /// Create a repository storing tables under `dir`.
    ///
    /// The directory is created on first save.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File holding the table for `handle`.
    pub fn path_for(&self, handle: &TableHandle) -> PathBuf {
        self.dir.join(format!("{handle}.msgpack"))
    }
}

impl QTableRepository for MsgPackRepository {
    fn load(&self, handle: &TableHandle) -> Result<Option<QTable>> {
        let path = self.path_for(handle);
        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(source) if source.kind() == ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(Error::Io {
                    operation: format!("read file {path:?}"),
                    source,
                });
            }
        };
        decode_table(&bytes).map(Some)
    }

    fn save(&self, handle: &TableHandle, table: &QTable) -> Result<()> {
        fs::create_dir_all(&self.dir).map_err(|source| Error::Io {
            operation: format!("create directory {:?}", self.dir),
            source,
        })?;

        let bytes = encode_table(table)?;
        let path = self.path_for(handle);
        let tmp_path = path.with_extension("msgpack.tmp");

        fs::write(&tmp_path, &bytes).map_err(|source| Error::Io {
            operation: format!("write file {tmp_path:?}"),
            source,
        })?;
        if let Err(source) = fs::rename(&tmp_path, &path) {
            if let Err(error) = fs::remove_file(&tmp_path) {
                tracing::warn!(path = ?tmp_path, %error, "failed to remove temporary table file");
            }
            return Err(Error::Io {
                operation: format!("move {tmp_path:?} to {path:?}"),
                source,
            });
        }

        Ok(())
    }

    fn clear(&self, handle: &TableHandle) -> Result<()> {
        let path = self.path_for(handle);
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(source) if source.kind() == ErrorKind::NotFound => Ok(()),
            Err(source) => Err(Error::Io {
                operation: format!("remove file {path:?}"),
                source,
            }),
        }
    }
}
