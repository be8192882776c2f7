//! Movie list / detail retrieval and normalization.
//!
//! Wraps `LocalTmdbApi` calls, maps raw TMDB payloads into
//! `MovieSummary` / `MovieDetail`, and classifies failures into
//! user-facing `FetchError` messages.

mod error;
mod fetch;
mod loading;
mod models;

pub use error::FetchError;
pub use fetch::{
    DETAIL_CAST_LIMIT, fetch_detail, fetch_list, now_playing, poster_url, search_movies,
};
pub use loading::{LoadingGuard, LoadingSignal};
pub use models::{CastMember, Genre, MovieDetail, MovieSummary, ProductionCountry};
