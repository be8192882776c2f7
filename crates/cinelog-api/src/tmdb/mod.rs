//! TMDB API client module.
//!
//! Handles HTTP requests to the TMDB API v3 movie endpoints
//! (list/search, details, credits).

mod api;
mod client;
mod error;
mod rate_limiter;
mod types;

#[allow(clippy::module_name_repetitions)]
pub use api::{LocalTmdbApi, TmdbApi};
#[allow(clippy::module_name_repetitions)]
pub use client::{TmdbClient, TmdbClientBuilder};
#[allow(clippy::module_name_repetitions)]
pub use error::TmdbError;
#[allow(clippy::module_name_repetitions)]
pub use types::{
    TmdbCastMember, TmdbGenre, TmdbMovieCredits, TmdbMovieDetails, TmdbMovieListItem,
    TmdbMovieListResponse, TmdbProductionCountry,
};
