//! TMDB API response types.
//!
//! Only the fields cinelog reads are declared; serde drops the rest.

use serde::Deserialize;

// --- List endpoints ---

/// Response from list endpoints (`search/movie`, `movie/now_playing`, ...).
///
/// `results` is optional so a payload without it can be reported
/// as "no data" rather than a decode failure.
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbMovieListResponse {
    /// Current page number.
    pub page: Option<u32>,
    /// Result items.
    pub results: Option<Vec<TmdbMovieListItem>>,
    /// Total number of pages.
    pub total_pages: Option<u32>,
    /// Total number of results.
    pub total_results: Option<u32>,
}

/// A single movie in a list response.
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbMovieListItem {
    /// TMDB movie ID.
    pub id: u64,
    /// Localized title.
    #[serde(default)]
    pub title: String,
    /// Overview text.
    pub overview: Option<String>,
    /// Genre IDs.
    pub genre_ids: Option<Vec<u32>>,
    /// Poster image path.
    pub poster_path: Option<String>,
    /// Release date (YYYY-MM-DD, may be empty).
    pub release_date: Option<String>,
}

// --- Movie details ---

/// Response from `movie/{movie_id}`.
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbMovieDetails {
    /// TMDB movie ID.
    pub id: u64,
    /// Localized title.
    #[serde(default)]
    pub title: String,
    /// Overview text.
    pub overview: Option<String>,
    /// Poster image path.
    pub poster_path: Option<String>,
    /// Release date.
    pub release_date: Option<String>,
    /// Genres.
    #[serde(default)]
    pub genres: Vec<TmdbGenre>,
    /// Official homepage URL (often empty).
    pub homepage: Option<String>,
    /// Production countries.
    #[serde(default)]
    pub production_countries: Vec<TmdbProductionCountry>,
}

/// Genre entry.
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbGenre {
    /// Genre ID.
    pub id: u32,
    /// Genre name.
    pub name: String,
}

/// Production country entry.
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbProductionCountry {
    /// ISO 3166-1 code.
    pub iso_3166_1: String,
    /// Country name.
    pub name: String,
}

// --- Movie credits ---

/// Response from `movie/{movie_id}/credits`.
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbMovieCredits {
    /// TMDB movie ID.
    pub id: Option<u64>,
    /// Cast in billing order.
    pub cast: Option<Vec<TmdbCastMember>>,
}

/// A cast member.
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbCastMember {
    /// Person name.
    pub name: String,
    /// Character played.
    pub character: Option<String>,
    /// Billing order.
    pub order: Option<u32>,
}

// --- Error Response ---

/// TMDB API error response body.
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbErrorResponse {
    /// TMDB error code.
    pub status_code: u32,
    /// Error message.
    pub status_message: String,
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::indexing_slicing)]

    use super::*;

    #[test]
    fn test_list_response_drops_unknown_fields() {
        // Arrange
        let json = r#"{
            "page": 1,
            "results": [{
                "id": 916224,
                "title": "すずめの戸締まり",
                "original_title": "すずめの戸締まり",
                "adult": false,
                "popularity": 80.5,
                "poster_path": "/suzume.jpg",
                "release_date": "2022-11-11",
                "genre_ids": [16, 18]
            }],
            "total_pages": 1,
            "total_results": 1
        }"#;

        // Act
        let response: TmdbMovieListResponse = serde_json::from_str(json).unwrap();

        // Assert
        let results = response.results.unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].id, 916_224);
        assert_eq!(results[0].genre_ids, Some(vec![16, 18]));
        assert!(results[0].overview.is_none());
    }

    #[test]
    fn test_list_response_without_results() {
        // Arrange
        let json = r#"{"page": 1}"#;

        // Act
        let response: TmdbMovieListResponse = serde_json::from_str(json).unwrap();

        // Assert
        assert!(response.results.is_none());
    }

    #[test]
    fn test_parse_movie_details() {
        // Arrange
        let json = r#"{
            "id": 7,
            "title": "君の名は。",
            "overview": "彗星が",
            "poster_path": null,
            "release_date": "2016-08-26",
            "genres": [{"id": 16, "name": "アニメーション"}],
            "homepage": "",
            "production_countries": [{"iso_3166_1": "JP", "name": "Japan"}],
            "runtime": 106
        }"#;

        // Act
        let details: TmdbMovieDetails = serde_json::from_str(json).unwrap();

        // Assert
        assert_eq!(details.id, 7);
        assert!(details.poster_path.is_none());
        assert_eq!(details.genres[0].name, "アニメーション");
        assert_eq!(details.production_countries[0].iso_3166_1, "JP");
    }

    #[test]
    fn test_parse_credits_without_cast() {
        // Arrange
        let json = r#"{"id": 7, "crew": []}"#;

        // Act
        let credits: TmdbMovieCredits = serde_json::from_str(json).unwrap();

        // Assert
        assert!(credits.cast.is_none());
    }

    #[test]
    fn test_parse_error_response() {
        // Arrange
        let json = r#"{"status_code":7,"status_message":"Invalid API key: You must be granted a valid key.","success":false}"#;

        // Act
        let error: TmdbErrorResponse = serde_json::from_str(json).unwrap();

        // Assert
        assert_eq!(error.status_code, 7);
        assert!(error.status_message.contains("Invalid API key"));
    }
}
