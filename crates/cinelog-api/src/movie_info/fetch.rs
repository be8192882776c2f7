//! Movie list / detail fetch operations.
#![allow(clippy::future_not_send)]

use anyhow::Result;
use tracing::instrument;

use super::error::FetchError;
use super::loading::LoadingSignal;
use super::models::{MovieDetail, MovieSummary};
use crate::tmdb::{LocalTmdbApi, TmdbError};

/// Maximum number of cast members kept in a `MovieDetail`.
pub const DETAIL_CAST_LIMIT: usize = 5;

/// Base URL for TMDB poster images.
const IMAGE_BASE_URL: &str = "https://image.tmdb.org/t/p/";

/// Fetches a list-style endpoint and normalizes its results.
///
/// `loading` is raised for the duration of the call. Failures are logged
/// and returned as a [`FetchError`]; nothing is retried here.
///
/// # Errors
///
/// Returns the classified [`FetchError`] if the request fails or the
/// response has no `results` array.
#[instrument(skip_all, fields(path = path))]
pub async fn fetch_list(
    api: &impl LocalTmdbApi,
    path: &str,
    params: &[(String, String)],
    loading: &LoadingSignal,
) -> Result<Vec<MovieSummary>, FetchError> {
    let _guard = loading.begin();

    load_list(api, path, params)
        .await
        .map_err(|err| report_failure(&err))
}

async fn load_list(
    api: &impl LocalTmdbApi,
    path: &str,
    params: &[(String, String)],
) -> Result<Vec<MovieSummary>> {
    let response = api.movie_list(path, params).await?;
    let results = response.results.ok_or_else(|| TmdbError::MissingField {
        path: String::from(path),
        field: "results",
    })?;

    tracing::debug!(count = results.len(), "Fetched movie list");
    Ok(results.into_iter().map(MovieSummary::from).collect())
}

/// Fetches movie details and credits concurrently and joins them.
///
/// Both requests must succeed; a failure of either one fails the whole
/// fetch and no partial detail is produced. Cast is cut to
/// [`DETAIL_CAST_LIMIT`] entries.
///
/// # Errors
///
/// Returns the classified [`FetchError`] if either request fails or
/// returns an empty payload.
#[instrument(skip_all, fields(movie_id = movie_id))]
pub async fn fetch_detail(
    api: &impl LocalTmdbApi,
    movie_id: u64,
    loading: &LoadingSignal,
) -> Result<MovieDetail, FetchError> {
    let _guard = loading.begin();

    load_detail(api, movie_id)
        .await
        .map_err(|err| report_failure(&err))
}

async fn load_detail(api: &impl LocalTmdbApi, movie_id: u64) -> Result<MovieDetail> {
    let (details, credits) = tokio::try_join!(
        api.movie_details(movie_id),
        api.movie_credits(movie_id)
    )?;

    let cast = credits
        .cast
        .unwrap_or_default()
        .into_iter()
        .take(DETAIL_CAST_LIMIT)
        .collect();

    Ok(MovieDetail::join(details, cast))
}

/// Searches movies by title (`search/movie`).
///
/// # Errors
///
/// See [`fetch_list`].
pub async fn search_movies(
    api: &impl LocalTmdbApi,
    query: &str,
    page: u32,
    loading: &LoadingSignal,
) -> Result<Vec<MovieSummary>, FetchError> {
    let params = [
        (String::from("query"), String::from(query)),
        (String::from("page"), page.to_string()),
    ];
    fetch_list(api, "search/movie", &params, loading).await
}

/// Lists movies now in theaters (`movie/now_playing`).
///
/// # Errors
///
/// See [`fetch_list`].
pub async fn now_playing(
    api: &impl LocalTmdbApi,
    page: u32,
    loading: &LoadingSignal,
) -> Result<Vec<MovieSummary>, FetchError> {
    let params = [(String::from("page"), page.to_string())];
    fetch_list(api, "movie/now_playing", &params, loading).await
}

/// Builds a poster image URL for the given TMDB image size (e.g. `w500`).
#[must_use]
pub fn poster_url(poster_path: &str, size: &str) -> String {
    let path = poster_path.trim_start_matches('/');
    format!("{IMAGE_BASE_URL}{size}/{path}")
}

/// Classifies and logs a failed fetch.
fn report_failure(err: &anyhow::Error) -> FetchError {
    let kind = FetchError::classify(err);
    tracing::error!(kind = ?kind, "Error fetching movies: {err:#}");
    kind
}
