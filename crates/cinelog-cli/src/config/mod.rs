//! Application configuration module.
//!
//! Manages the TOML config file holding TMDB settings and the
//! watch log storage backend.

#[allow(clippy::module_inception)]
mod config;

#[allow(clippy::module_name_repetitions)]
pub use config::{AppConfig, TMDB_TOKEN_ENV, resolve_config_path};
