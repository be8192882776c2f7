//! The watch log store: ordered in-memory collection with write-through persistence.

use anyhow::{Context, Result};

use super::repository::WatchLogRepository;
use super::watch_log::WatchLogEntry;

/// The user's watch log.
///
/// Rehydrated from its repository on [`open`](Self::open); every
/// [`add_movie_log`](Self::add_movie_log) is written through before it
/// becomes visible in [`all`](Self::all).
#[derive(Debug)]
pub struct WatchLogStore<R> {
    repo: R,
    entries: Vec<WatchLogEntry>,
}

impl<R: WatchLogRepository> WatchLogStore<R> {
    /// Opens the store and loads the persisted collection.
    ///
    /// # Errors
    ///
    /// Returns an error if the repository cannot be read.
    pub fn open(mut repo: R) -> Result<Self> {
        let entries = repo.load().context("failed to load watch log")?;
        tracing::debug!(count = entries.len(), "Watch log rehydrated");
        Ok(Self { repo, entries })
    }

    /// Appends `entry` to the end of the log.
    ///
    /// No uniqueness check is made on `entry.id`. If persistence fails the
    /// in-memory collection is left unchanged.
    ///
    /// # Errors
    ///
    /// Returns an error if the repository cannot be written.
    pub fn add_movie_log(&mut self, entry: WatchLogEntry) -> Result<()> {
        self.repo
            .append(&entry)
            .with_context(|| format!("failed to persist movie log {}", entry.id))?;
        tracing::info!(id = entry.id, title = %entry.title, "Movie log added");
        self.entries.push(entry);
        Ok(())
    }

    /// All entries in insertion order.
    #[must_use]
    pub fn all(&self) -> &[WatchLogEntry] {
        &self.entries
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the log is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::indexing_slicing)]

    use super::*;
    use crate::memory::MemoryWatchLogRepository;
    use crate::sqlite::SqliteWatchLogRepository;
    use crate::watch_log::WatchType;

    /// Repository whose writes always fail.
    #[derive(Debug)]
    struct ReadOnlyRepository;

    impl WatchLogRepository for ReadOnlyRepository {
        fn load(&mut self) -> Result<Vec<WatchLogEntry>> {
            Ok(Vec::new())
        }

        fn append(&mut self, _entry: &WatchLogEntry) -> Result<()> {
            anyhow::bail!("read-only")
        }
    }

    fn entry(id: u64, title: &str) -> WatchLogEntry {
        WatchLogEntry {
            id,
            title: String::from(title),
            poster_path: String::from("/a.jpg"),
            watched_date: String::from("2021-05-05"),
            watch_type: None,
            memo: None,
        }
    }

    #[test]
    fn test_new_store_is_empty() {
        // Arrange & Act
        let store = WatchLogStore::open(MemoryWatchLogRepository::default()).unwrap();

        // Assert
        assert!(store.is_empty());
        assert!(store.all().is_empty());
    }

    #[test]
    fn test_add_movie_log_appends_in_call_order() {
        // Arrange
        let mut store = WatchLogStore::open(MemoryWatchLogRepository::default()).unwrap();

        // Act
        store.add_movie_log(entry(1, "A")).unwrap();
        let after_first = store.len();
        store.add_movie_log(entry(2, "B")).unwrap();

        // Assert
        assert_eq!(after_first, 1);
        assert_eq!(store.len(), 2);
        assert_eq!(store.all()[0].id, 1);
        assert_eq!(store.all()[1].id, 2);
    }

    #[test]
    fn test_duplicate_ids_are_kept() {
        // Arrange
        let mut store = WatchLogStore::open(MemoryWatchLogRepository::default()).unwrap();
        let mut rewatch = entry(1, "A");
        rewatch.watched_date = String::from("2022-01-01");
        rewatch.watch_type = Some(WatchType::Streaming);

        // Act
        store.add_movie_log(entry(1, "A")).unwrap();
        store.add_movie_log(rewatch.clone()).unwrap();

        // Assert
        assert_eq!(store.all(), &[entry(1, "A"), rewatch]);
    }

    #[test]
    fn test_open_rehydrates_existing_entries() {
        // Arrange
        let repo = MemoryWatchLogRepository::with_entries(vec![entry(5, "E"), entry(3, "C")]);

        // Act
        let store = WatchLogStore::open(repo).unwrap();

        // Assert
        assert_eq!(store.all(), &[entry(5, "E"), entry(3, "C")]);
    }

    #[test]
    fn test_failed_persist_leaves_memory_unchanged() {
        // Arrange
        let mut store = WatchLogStore::open(ReadOnlyRepository).unwrap();

        // Act
        let result = store.add_movie_log(entry(1, "A"));

        // Assert
        assert!(result.unwrap_err().to_string().contains("failed to persist"));
        assert!(store.is_empty());
    }

    #[test]
    fn test_write_through_survives_restart() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        let dir_path = dir.path().to_path_buf();
        let mut store =
            WatchLogStore::open(SqliteWatchLogRepository::open(Some(&dir_path)).unwrap()).unwrap();
        store.add_movie_log(entry(1, "A")).unwrap();
        store.add_movie_log(entry(2, "B")).unwrap();
        drop(store);

        // Act
        let reopened =
            WatchLogStore::open(SqliteWatchLogRepository::open(Some(&dir_path)).unwrap()).unwrap();

        // Assert
        assert_eq!(reopened.all(), &[entry(1, "A"), entry(2, "B")]);
    }
}
