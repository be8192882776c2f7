//! `AppConfig` struct, TOML loading, and config path resolution.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use cinelog_db::StorageBackend;
use serde::{Deserialize, Serialize};

/// Environment variable overriding `tmdb.api_token`.
pub const TMDB_TOKEN_ENV: &str = "TMDB_API_TOKEN";

/// Top-level application configuration.
#[derive(Debug, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct AppConfig {
    /// TMDB API settings.
    #[serde(default)]
    pub tmdb: TmdbConfig,
    /// Watch log storage settings.
    #[serde(default)]
    pub storage: StorageConfig,
}

/// TMDB API configuration.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct TmdbConfig {
    /// Response language sent with every request.
    pub language: String,
    /// Region sent with every request.
    pub region: String,
    /// Bearer token (the environment variable takes precedence).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_token: Option<String>,
}

impl Default for TmdbConfig {
    fn default() -> Self {
        Self {
            language: String::from("ja-JP"),
            region: String::from("JP"),
            api_token: None,
        }
    }
}

/// Watch log storage configuration.
#[derive(Debug, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct StorageConfig {
    /// Persistence backend.
    #[serde(default)]
    pub backend: StorageBackend,
}

impl AppConfig {
    /// Loads config from a TOML file. Returns default if file does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("failed to parse {}", path.display()))
    }

    /// Resolves the TMDB token: `env_token` first, then `tmdb.api_token`.
    ///
    /// # Errors
    ///
    /// Returns an error if neither source provides a non-empty token.
    pub fn api_token(&self, env_token: Option<String>) -> Result<String> {
        env_token
            .filter(|t| !t.is_empty())
            .or_else(|| self.tmdb.api_token.clone().filter(|t| !t.is_empty()))
            .with_context(|| {
                format!("{TMDB_TOKEN_ENV} environment variable or tmdb.api_token in config.toml is required")
            })
    }
}

/// Resolves the config file path.
///
/// - If `dir` is `Some`, returns `{dir}/config.toml`.
/// - Otherwise returns `~/.config/cinelog/config.toml`.
///
/// # Errors
///
/// Returns an error if the home directory cannot be determined (when `dir` is `None`).
pub fn resolve_config_path(dir: Option<&PathBuf>) -> Result<PathBuf> {
    if let Some(d) = dir {
        return Ok(d.join("config.toml"));
    }

    let home = std::env::var("HOME").context("HOME environment variable is not set")?;
    Ok(PathBuf::from(home)
        .join(".config")
        .join("cinelog")
        .join("config.toml"))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn test_default_config() {
        // Arrange & Act
        let config = AppConfig::default();

        // Assert
        assert_eq!(config.tmdb.language, "ja-JP");
        assert_eq!(config.tmdb.region, "JP");
        assert_eq!(config.storage.backend, StorageBackend::Sqlite);
    }

    #[test]
    fn test_load_nonexistent_returns_default() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();

        // Act
        let config = AppConfig::load(&dir.path().join("config.toml")).unwrap();

        // Assert
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_load_partial_config() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[storage]\nbackend = \"json\"\n\n[tmdb]\nregion = \"US\"\n").unwrap();

        // Act
        let config = AppConfig::load(&path).unwrap();

        // Assert
        assert_eq!(config.storage.backend, StorageBackend::Json);
        assert_eq!(config.tmdb.region, "US");
        assert_eq!(config.tmdb.language, "ja-JP");
    }

    #[test]
    fn test_load_invalid_backend_fails() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[storage]\nbackend = \"redis\"\n").unwrap();

        // Act
        let result = AppConfig::load(&path);

        // Assert
        assert!(result.unwrap_err().to_string().contains("failed to parse"));
    }

    #[test]
    fn test_api_token_prefers_env() {
        // Arrange
        let mut config = AppConfig::default();
        config.tmdb.api_token = Some(String::from("from-config"));

        // Act & Assert
        assert_eq!(
            config.api_token(Some(String::from("from-env"))).unwrap(),
            "from-env"
        );
        assert_eq!(config.api_token(None).unwrap(), "from-config");
        assert_eq!(config.api_token(Some(String::new())).unwrap(), "from-config");
    }

    #[test]
    fn test_api_token_missing() {
        // Arrange
        let config = AppConfig::default();

        // Act
        let err = config.api_token(None).unwrap_err();

        // Assert
        assert!(err.to_string().contains(TMDB_TOKEN_ENV));
    }

    #[test]
    fn test_resolve_config_path() {
        // Arrange
        let dir = PathBuf::from("/tmp/myproject");

        // Act & Assert
        assert_eq!(
            resolve_config_path(Some(&dir)).unwrap(),
            PathBuf::from("/tmp/myproject/config.toml")
        );
        assert!(
            resolve_config_path(None)
                .unwrap()
                .ends_with(".config/cinelog/config.toml")
        );
    }
}
