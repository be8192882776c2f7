//! Watch log persistence for cinelog.
//!
//! Holds the user's log of watched movies behind a
//! `WatchLogRepository` so the storage backend (bundled `SQLite`,
//! a JSON file, or memory only) can be swapped from config.

mod connection;
mod json_file;
mod memory;
mod migrations;
mod paths;
mod repository;
mod sqlite;
mod store;
/// Watch log entry types.
pub mod watch_log;

pub use connection::open_db;
pub use json_file::{JsonFileWatchLogRepository, STORE_KEY};
pub use memory::MemoryWatchLogRepository;
pub use paths::resolve_data_dir;
pub use repository::{StorageBackend, WatchLogRepository, open_repository};
pub use sqlite::SqliteWatchLogRepository;
pub use store::WatchLogStore;
pub use watch_log::{WatchLogEntry, WatchType, WatchTypeParseError};
