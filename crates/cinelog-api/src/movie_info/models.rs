//! Normalized movie types shown by list and detail views.

use serde::{Deserialize, Serialize};

use crate::tmdb::{
    TmdbCastMember, TmdbGenre, TmdbMovieDetails, TmdbMovieListItem, TmdbProductionCountry,
};

/// Minimal movie fields shown in list views.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovieSummary {
    /// TMDB movie ID (unique within TMDB only).
    pub id: u64,
    /// Localized title.
    pub title: String,
    /// Overview text.
    pub overview: Option<String>,
    /// Genre IDs.
    pub genre_ids: Option<Vec<u32>>,
    /// Poster image path.
    pub poster_path: Option<String>,
    /// Release date (YYYY-MM-DD, empty when unknown).
    pub release_date: String,
}

impl From<TmdbMovieListItem> for MovieSummary {
    fn from(item: TmdbMovieListItem) -> Self {
        Self {
            id: item.id,
            title: item.title,
            overview: item.overview,
            genre_ids: item.genre_ids,
            poster_path: item.poster_path,
            release_date: item.release_date.unwrap_or_default(),
        }
    }
}

/// Genre name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Genre {
    /// Genre ID.
    pub id: u32,
    /// Genre name.
    pub name: String,
}

/// Production country.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductionCountry {
    /// ISO 3166-1 code.
    pub iso_3166_1: String,
    /// Country name.
    pub name: String,
}

/// Billed cast member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CastMember {
    /// Person name.
    pub name: String,
}

/// Full movie record: details joined with the leading cast.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovieDetail {
    /// TMDB movie ID.
    pub id: u64,
    /// Localized title.
    pub title: String,
    /// Overview text.
    pub overview: Option<String>,
    /// Poster image path.
    pub poster_path: Option<String>,
    /// Release date.
    pub release_date: String,
    /// Genres.
    pub genres: Vec<Genre>,
    /// Official homepage (empty when none).
    pub homepage: String,
    /// Production countries.
    pub production_countries: Vec<ProductionCountry>,
    /// Leading cast, in billing order.
    pub cast: Vec<CastMember>,
}

impl MovieDetail {
    /// Joins a details payload with an already truncated cast list.
    pub(crate) fn join(details: TmdbMovieDetails, cast: Vec<TmdbCastMember>) -> Self {
        Self {
            id: details.id,
            title: details.title,
            overview: details.overview,
            poster_path: details.poster_path,
            release_date: details.release_date.unwrap_or_default(),
            genres: details.genres.into_iter().map(Genre::from).collect(),
            homepage: details.homepage.unwrap_or_default(),
            production_countries: details
                .production_countries
                .into_iter()
                .map(ProductionCountry::from)
                .collect(),
            cast: cast
                .into_iter()
                .map(|c| CastMember { name: c.name })
                .collect(),
        }
    }
}

impl From<TmdbGenre> for Genre {
    fn from(g: TmdbGenre) -> Self {
        Self {
            id: g.id,
            name: g.name,
        }
    }
}

impl From<TmdbProductionCountry> for ProductionCountry {
    fn from(c: TmdbProductionCountry) -> Self {
        Self {
            iso_3166_1: c.iso_3166_1,
            name: c.name,
        }
    }
}
