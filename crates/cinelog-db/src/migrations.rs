//! Schema version management using `PRAGMA user_version`.

use anyhow::{Context, Result};
use rusqlite::Connection;

/// Current schema version.
const CURRENT_VERSION: u32 = 1;

/// Runs database migrations up to `CURRENT_VERSION`.
///
/// # Errors
///
/// Returns an error if any SQL statement fails.
pub fn run_migrations(conn: &Connection) -> Result<()> {
    let version: u32 = conn
        .pragma_query_value(None, "user_version", |row| row.get(0))
        .context("failed to read user_version")?;

    if version < 1 {
        migrate_v1(conn).context("migration to v1 failed")?;
    }

    conn.pragma_update(None, "user_version", CURRENT_VERSION)
        .context("failed to update user_version")?;

    Ok(())
}

/// Migration to v1: create the `movie_logs` table.
///
/// `seq` fixes insertion order; `movie_id` is not unique.
fn migrate_v1(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS movie_logs (
            seq           INTEGER PRIMARY KEY AUTOINCREMENT,
            movie_id      INTEGER NOT NULL,
            title         TEXT NOT NULL,
            poster_path   TEXT NOT NULL,
            watched_date  TEXT NOT NULL,
            watch_type    TEXT,
            memo          TEXT
        );",
    )
    .context("failed to create movie_logs table")?;

    Ok(())
}
