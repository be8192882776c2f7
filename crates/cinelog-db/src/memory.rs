//! In-memory watch log repository (no persistence).

use anyhow::Result;

use super::repository::WatchLogRepository;
use super::watch_log::WatchLogEntry;

/// Keeps entries for the lifetime of the process only.
#[derive(Debug, Default)]
#[allow(clippy::module_name_repetitions)]
pub struct MemoryWatchLogRepository {
    entries: Vec<WatchLogEntry>,
}

impl MemoryWatchLogRepository {
    /// Creates a repository pre-populated with `entries`.
    #[must_use]
    pub const fn with_entries(entries: Vec<WatchLogEntry>) -> Self {
        Self { entries }
    }
}

impl WatchLogRepository for MemoryWatchLogRepository {
    fn load(&mut self) -> Result<Vec<WatchLogEntry>> {
        Ok(self.entries.clone())
    }

    fn append(&mut self, entry: &WatchLogEntry) -> Result<()> {
        self.entries.push(entry.clone());
        Ok(())
    }
}
