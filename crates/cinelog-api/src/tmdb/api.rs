//! `TmdbApi` trait definition.
#![allow(clippy::future_not_send)]

use anyhow::Result;

use super::types::{TmdbMovieCredits, TmdbMovieDetails, TmdbMovieListResponse};

/// TMDB API trait.
///
/// Abstracts API operations for mock substitution in tests.
/// Uses `trait_variant::make` to generate a `Send`-bound async trait.
#[allow(clippy::module_name_repetitions)]
#[trait_variant::make(TmdbApi: Send)]
pub trait LocalTmdbApi {
    /// Fetches a list-style endpoint (`search/movie`, `movie/now_playing`,
    /// `discover/movie`, ...) with extra query parameters.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON parsing fails.
    async fn movie_list(
        &self,
        path: &str,
        params: &[(String, String)],
    ) -> Result<TmdbMovieListResponse>;

    /// Fetches movie details.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON parsing fails.
    async fn movie_details(&self, movie_id: u64) -> Result<TmdbMovieDetails>;

    /// Fetches movie credits (cast).
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON parsing fails.
    async fn movie_credits(&self, movie_id: u64) -> Result<TmdbMovieCredits>;
}
