//! JSON-file watch log repository.
//!
//! The whole collection is stored as one document under [`STORE_KEY`]
//! and rewritten on every append.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use super::paths::resolve_data_dir;
use super::repository::WatchLogRepository;
use super::watch_log::WatchLogEntry;

/// Key under which the collection is stored.
pub const STORE_KEY: &str = "movieLogs";

/// File name inside the data directory.
const FILE_NAME: &str = "movie_logs.json";

/// On-disk document.
#[derive(Debug, Default, Serialize, Deserialize)]
struct PersistedLog {
    #[serde(rename = "movieLogs", default)]
    movie_logs: Vec<WatchLogEntry>,
}

/// Persists the collection as a single JSON document.
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct JsonFileWatchLogRepository {
    path: PathBuf,
    /// Last known file contents; `None` until the file has been read.
    entries: Option<Vec<WatchLogEntry>>,
}

impl JsonFileWatchLogRepository {
    /// Creates a repository backed by `path`.
    ///
    /// The file is read on the first `load` or `append`.
    #[must_use]
    pub const fn new(path: PathBuf) -> Self {
        Self {
            path,
            entries: None,
        }
    }

    /// Uses `{dir}/movie_logs.json`, creating the directory if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the data directory cannot be resolved or created.
    pub fn open(dir: Option<&PathBuf>) -> Result<Self> {
        let data_dir = resolve_data_dir(dir)?;
        std::fs::create_dir_all(&data_dir)
            .with_context(|| format!("failed to create directory {}", data_dir.display()))?;
        Ok(Self::new(data_dir.join(FILE_NAME)))
    }

    /// Path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the persisted collection; a missing or empty file is an empty log.
    fn read_file(&self) -> Result<Vec<WatchLogEntry>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let content = std::fs::read_to_string(&self.path)
            .with_context(|| format!("failed to read {}", self.path.display()))?;
        if content.trim().is_empty() {
            return Ok(Vec::new());
        }
        let doc: PersistedLog = serde_json::from_str(&content)
            .with_context(|| format!("failed to parse {}", self.path.display()))?;
        Ok(doc.movie_logs)
    }

    /// Writes `entries` to a sibling temp file, then renames it over the target.
    fn write_all(&self, entries: Vec<WatchLogEntry>) -> Result<Vec<WatchLogEntry>> {
        let doc = PersistedLog {
            movie_logs: entries,
        };
        let content = serde_json::to_string_pretty(&doc).context("failed to serialize watch log")?;

        let tmp_path = self.path.with_extension("json.tmp");
        std::fs::write(&tmp_path, content)
            .with_context(|| format!("failed to write {}", tmp_path.display()))?;
        std::fs::rename(&tmp_path, &self.path)
            .with_context(|| format!("failed to replace {}", self.path.display()))?;

        Ok(doc.movie_logs)
    }
}

impl WatchLogRepository for JsonFileWatchLogRepository {
    fn load(&mut self) -> Result<Vec<WatchLogEntry>> {
        let entries = self.read_file()?;
        self.entries = Some(entries.clone());
        Ok(entries)
    }

    fn append(&mut self, entry: &WatchLogEntry) -> Result<()> {
        let mut next = match &self.entries {
            Some(entries) => entries.clone(),
            None => self.read_file()?,
        };
        next.push(entry.clone());
        self.entries = Some(self.write_all(next)?);
        Ok(())
    }
}
