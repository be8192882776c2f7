//! Database connection management.

use std::path::PathBuf;

use anyhow::{Context, Result};
use rusqlite::Connection;

use super::migrations::run_migrations;
use super::paths::resolve_data_dir;

/// Database file name inside the data directory.
const DB_FILE_NAME: &str = "cinelog.db";

/// Opens (or creates) the database and runs migrations.
///
/// - If `dir` is `Some`, uses `{dir}/cinelog.db`.
/// - Otherwise uses `~/.local/share/cinelog/cinelog.db`.
///
/// # Errors
///
/// Returns an error if the database cannot be opened or migrations fail.
pub fn open_db(dir: Option<&PathBuf>) -> Result<Connection> {
    let data_dir = resolve_data_dir(dir)?;
    std::fs::create_dir_all(&data_dir)
        .with_context(|| format!("failed to create directory {}", data_dir.display()))?;

    let db_path = data_dir.join(DB_FILE_NAME);
    let conn = Connection::open(&db_path)
        .with_context(|| format!("failed to open database {}", db_path.display()))?;
    tracing::debug!(path = %db_path.display(), "Opened watch log database");

    run_migrations(&conn).context("database migration failed")?;

    Ok(conn)
}
