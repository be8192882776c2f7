//! Watch log repository interface and backend selection.

use std::fmt;
use std::path::PathBuf;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use super::json_file::JsonFileWatchLogRepository;
use super::memory::MemoryWatchLogRepository;
use super::sqlite::SqliteWatchLogRepository;
use super::watch_log::WatchLogEntry;

/// Persistence backend for the watch log.
///
/// Implementations must return entries from [`load`](Self::load) in the
/// order they were appended.
#[allow(clippy::module_name_repetitions)]
pub trait WatchLogRepository: fmt::Debug {
    /// Reads the whole persisted collection.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing storage cannot be read.
    fn load(&mut self) -> Result<Vec<WatchLogEntry>>;

    /// Persists one more entry at the end of the collection.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing storage cannot be written.
    fn append(&mut self, entry: &WatchLogEntry) -> Result<()>;
}

impl<R: WatchLogRepository + ?Sized> WatchLogRepository for Box<R> {
    fn load(&mut self) -> Result<Vec<WatchLogEntry>> {
        (**self).load()
    }

    fn append(&mut self, entry: &WatchLogEntry) -> Result<()> {
        (**self).append(entry)
    }
}

/// Selectable storage backend.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// Bundled `SQLite` database.
    #[default]
    Sqlite,
    /// Single JSON document rewritten on every append.
    Json,
    /// No persistence.
    Memory,
}

/// Opens the repository for `backend` under the data directory.
///
/// # Errors
///
/// Returns an error if the backing storage cannot be created or opened.
pub fn open_repository(
    backend: StorageBackend,
    dir: Option<&PathBuf>,
) -> Result<Box<dyn WatchLogRepository>> {
    tracing::debug!(?backend, "Opening watch log repository");
    Ok(match backend {
        StorageBackend::Sqlite => Box::new(SqliteWatchLogRepository::open(dir)?),
        StorageBackend::Json => Box::new(JsonFileWatchLogRepository::open(dir)?),
        StorageBackend::Memory => Box::new(MemoryWatchLogRepository::default()),
    })
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn test_backend_deserialize() {
        // Arrange
        #[derive(Deserialize)]
        struct Wrapper {
            backend: StorageBackend,
        }

        // Act
        let parsed: Wrapper = serde_json::from_str(r#"{"backend":"json"}"#).unwrap();

        // Assert
        assert_eq!(parsed.backend, StorageBackend::Json);
        assert_eq!(StorageBackend::default(), StorageBackend::Sqlite);
    }

    #[test]
    fn test_open_each_backend() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        let dir_path = dir.path().to_path_buf();

        for backend in [
            StorageBackend::Sqlite,
            StorageBackend::Json,
            StorageBackend::Memory,
        ] {
            // Act
            let mut repo = open_repository(backend, Some(&dir_path)).unwrap();

            // Assert
            assert!(repo.load().unwrap().is_empty(), "{backend:?}");
        }
    }
}
