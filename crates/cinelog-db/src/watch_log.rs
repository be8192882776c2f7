//! Watch log entry and viewing method.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// How a movie was watched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WatchType {
    /// In a movie theater.
    #[serde(alias = "映画館")]
    Theater,
    /// On a streaming service.
    #[serde(alias = "配信")]
    Streaming,
}

impl WatchType {
    /// Stable identifier used for storage.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Theater => "theater",
            Self::Streaming => "streaming",
        }
    }

    /// Display label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Theater => "映画館",
            Self::Streaming => "配信",
        }
    }
}

impl fmt::Display for WatchType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unrecognized viewing method.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid watch type: {0} (expected theater or streaming)")]
pub struct WatchTypeParseError(pub String);

impl FromStr for WatchType {
    type Err = WatchTypeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "映画館" => Ok(Self::Theater),
            "配信" => Ok(Self::Streaming),
            other if other.eq_ignore_ascii_case("theater") => Ok(Self::Theater),
            other if other.eq_ignore_ascii_case("streaming") => Ok(Self::Streaming),
            other => Err(WatchTypeParseError(String::from(other))),
        }
    }
}

/// A user-authored record of having watched a movie.
///
/// `title` and `poster_path` are copied from the movie when the entry is
/// created; later changes on TMDB are not reflected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WatchLogEntry {
    /// TMDB movie ID (not unique within the log).
    pub id: u64,
    /// Movie title snapshot.
    pub title: String,
    /// Poster path snapshot.
    pub poster_path: String,
    /// Date watched (YYYY-MM-DD).
    pub watched_date: String,
    /// Viewing method.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub watch_type: Option<WatchType>,
    /// Free-text memo.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memo: Option<String>,
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn test_parse_watch_type() {
        assert_eq!("theater".parse::<WatchType>(), Ok(WatchType::Theater));
        assert_eq!("Streaming".parse::<WatchType>(), Ok(WatchType::Streaming));
        assert_eq!("映画館".parse::<WatchType>(), Ok(WatchType::Theater));
        assert_eq!("配信".parse::<WatchType>(), Ok(WatchType::Streaming));
    }

    #[test]
    fn test_parse_invalid_watch_type() {
        // Arrange & Act
        let err = "dvd".parse::<WatchType>().unwrap_err();

        // Assert
        assert_eq!(err, WatchTypeParseError(String::from("dvd")));
        assert!(err.to_string().contains("dvd"));
    }

    #[test]
    fn test_entry_json_uses_camel_case() {
        // Arrange
        let entry = WatchLogEntry {
            id: 1,
            title: String::from("A"),
            poster_path: String::from("/a.jpg"),
            watched_date: String::from("2021-05-05"),
            watch_type: Some(WatchType::Theater),
            memo: None,
        };

        // Act
        let json = serde_json::to_value(&entry).unwrap();

        // Assert
        assert_eq!(
            json,
            serde_json::json!({
                "id": 1,
                "title": "A",
                "posterPath": "/a.jpg",
                "watchedDate": "2021-05-05",
                "watchType": "theater"
            })
        );
    }

    #[test]
    fn test_entry_accepts_japanese_watch_type() {
        // Arrange
        let json = r#"{"id":2,"title":"B","posterPath":"/b.jpg","watchedDate":"2021-05-06","watchType":"配信","memo":"良かった"}"#;

        // Act
        let entry: WatchLogEntry = serde_json::from_str(json).unwrap();

        // Assert
        assert_eq!(entry.watch_type, Some(WatchType::Streaming));
        assert_eq!(entry.memo.as_deref(), Some("良かった"));
    }
}
