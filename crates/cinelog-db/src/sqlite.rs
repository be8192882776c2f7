//! `SQLite`-backed watch log repository.

use std::path::PathBuf;

use anyhow::{Context, Result};
use rusqlite::Connection;

use super::connection::open_db;
use super::repository::WatchLogRepository;
use super::watch_log::{WatchLogEntry, WatchType};

/// Stores one row per entry in the `movie_logs` table.
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct SqliteWatchLogRepository {
    conn: Connection,
}

impl SqliteWatchLogRepository {
    /// Wraps an already migrated connection.
    #[must_use]
    pub const fn new(conn: Connection) -> Self {
        Self { conn }
    }

    /// Opens `{dir}/cinelog.db`, running migrations.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open(dir: Option<&PathBuf>) -> Result<Self> {
        open_db(dir).map(Self::new)
    }
}

/// Row as stored, before `watch_type` is parsed.
type RawRow = (u64, String, String, String, Option<String>, Option<String>);

/// Converts a raw `movie_logs` row, rejecting unknown `watch_type` values.
fn row_to_entry(row: RawRow) -> Result<WatchLogEntry> {
    let (id, title, poster_path, watched_date, watch_type, memo) = row;
    let watch_type = watch_type
        .map(|s| s.parse::<WatchType>())
        .transpose()
        .with_context(|| format!("corrupt watch_type for movie {id}"))?;
    Ok(WatchLogEntry {
        id,
        title,
        poster_path,
        watched_date,
        watch_type,
        memo,
    })
}

impl WatchLogRepository for SqliteWatchLogRepository {
    fn load(&mut self) -> Result<Vec<WatchLogEntry>> {
        let mut stmt = self
            .conn
            .prepare(
                "SELECT movie_id, title, poster_path, watched_date, watch_type, memo
                 FROM movie_logs
                 ORDER BY seq",
            )
            .context("failed to prepare movie_logs query")?;

        let rows = stmt
            .query_map([], |row| {
                Ok((
                    row.get(0)?,
                    row.get(1)?,
                    row.get(2)?,
                    row.get(3)?,
                    row.get(4)?,
                    row.get(5)?,
                ))
            })
            .context("failed to query movie_logs")?;

        let raw: Vec<RawRow> = rows
            .collect::<std::result::Result<_, _>>()
            .context("failed to read movie_logs rows")?;

        raw.into_iter().map(row_to_entry).collect()
    }

    fn append(&mut self, entry: &WatchLogEntry) -> Result<()> {
        self.conn
            .execute(
                "INSERT INTO movie_logs (movie_id, title, poster_path, watched_date, watch_type, memo)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                rusqlite::params![
                    entry.id,
                    entry.title,
                    entry.poster_path,
                    entry.watched_date,
                    entry.watch_type.map(WatchType::as_str),
                    entry.memo,
                ],
            )
            .with_context(|| format!("failed to insert movie log {}", entry.id))?;
        Ok(())
    }
}
