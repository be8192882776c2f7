//! Data directory resolution.

use std::path::PathBuf;

use anyhow::{Context, Result};

/// Resolves the directory holding persisted watch log data.
///
/// - If `dir` is `Some`, returns it unchanged.
/// - Otherwise returns `~/.local/share/cinelog`.
///
/// # Errors
///
/// Returns an error if the home directory cannot be determined (when `dir` is `None`).
pub fn resolve_data_dir(dir: Option<&PathBuf>) -> Result<PathBuf> {
    if let Some(d) = dir {
        return Ok(d.clone());
    }

    let home = std::env::var("HOME").context("HOME environment variable is not set")?;
    Ok(PathBuf::from(home)
        .join(".local")
        .join("share")
        .join("cinelog"))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn test_resolve_with_dir() {
        // Arrange
        let dir = PathBuf::from("/tmp/myproject");

        // Act
        let path = resolve_data_dir(Some(&dir)).unwrap();

        // Assert
        assert_eq!(path, PathBuf::from("/tmp/myproject"));
    }

    #[test]
    fn test_resolve_default() {
        // Arrange & Act
        let path = resolve_data_dir(None).unwrap();

        // Assert
        assert!(path.ends_with(".local/share/cinelog"));
    }
}
