//! `TmdbClient` - TMDB API client implementation.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::{Client, StatusCode, header};
use serde::de::DeserializeOwned;
use tokio::sync::Mutex;
use tracing::instrument;
use url::Url;

use super::api::LocalTmdbApi;
use super::error::TmdbError;
use super::rate_limiter::TmdbRateLimiter;
use super::types::{TmdbErrorResponse, TmdbMovieCredits, TmdbMovieDetails, TmdbMovieListResponse};

/// Default base URL for TMDB API v3.
const DEFAULT_BASE_URL: &str = "https://api.themoviedb.org/3/";

/// Default response language.
const DEFAULT_LANGUAGE: &str = "ja-JP";

/// Default region (ISO 3166-1).
const DEFAULT_REGION: &str = "JP";

/// Maximum number of retries for HTTP 429 responses.
const MAX_RETRIES: u32 = 3;

/// Backoff unit between retries (multiplied by the retry count).
const RETRY_BACKOFF: Duration = Duration::from_secs(1);

/// TMDB API client.
///
/// Every request carries the bearer token and the fixed
/// `language` / `region` query parameters.
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct TmdbClient {
    /// HTTP client.
    http_client: Client,
    /// Base URL for API requests.
    base_url: Url,
    /// Bearer API token.
    api_token: String,
    /// Fixed `language` parameter.
    language: String,
    /// Fixed `region` parameter.
    region: String,
    /// Rate limiter.
    rate_limiter: Arc<Mutex<TmdbRateLimiter>>,
}

/// Builder for `TmdbClient`.
#[derive(Debug, Default)]
#[allow(clippy::module_name_repetitions)]
pub struct TmdbClientBuilder {
    base_url: Option<Url>,
    api_token: Option<String>,
    user_agent: Option<String>,
    language: Option<String>,
    region: Option<String>,
    min_interval: Option<Duration>,
}

impl TmdbClientBuilder {
    /// Overrides the base URL (for wiremock in tests).
    #[must_use]
    pub fn base_url(mut self, url: Url) -> Self {
        self.base_url = Some(url);
        self
    }

    /// Sets the API bearer token (required).
    #[must_use]
    pub fn api_token(mut self, token: impl Into<String>) -> Self {
        self.api_token = Some(token.into());
        self
    }

    /// Sets the User-Agent (required).
    #[must_use]
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = Some(ua.into());
        self
    }

    /// Sets the response language (default: `ja-JP`).
    #[must_use]
    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    /// Sets the region (default: `JP`).
    #[must_use]
    pub fn region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    /// Sets the minimum request interval (default: 25ms).
    #[must_use]
    pub const fn min_interval(mut self, interval: Duration) -> Self {
        self.min_interval = Some(interval);
        self
    }

    /// Builds the client.
    ///
    /// # Errors
    ///
    /// - `api_token` is not set or empty.
    /// - `user_agent` is not set.
    /// - `reqwest::Client` build fails.
    pub fn build(self) -> Result<TmdbClient> {
        let api_token = self
            .api_token
            .filter(|t| !t.is_empty())
            .context("api_token is required")?;
        let user_agent = self.user_agent.context("user_agent is required")?;

        let base_url = match self.base_url {
            Some(url) => url,
            None => Url::parse(DEFAULT_BASE_URL).context("invalid default base URL")?,
        };

        let rate_limiter = self
            .min_interval
            .map_or_else(TmdbRateLimiter::default, TmdbRateLimiter::new);

        let http_client = Client::builder()
            .user_agent(&user_agent)
            .gzip(true)
            .build()
            .context("failed to build HTTP client")?;

        Ok(TmdbClient {
            http_client,
            base_url,
            api_token,
            language: self
                .language
                .unwrap_or_else(|| String::from(DEFAULT_LANGUAGE)),
            region: self.region.unwrap_or_else(|| String::from(DEFAULT_REGION)),
            rate_limiter: Arc::new(Mutex::new(rate_limiter)),
        })
    }
}

impl TmdbClient {
    /// Creates a new builder.
    #[must_use]
    pub fn builder() -> TmdbClientBuilder {
        TmdbClientBuilder::default()
    }

    /// Sends a GET request with Bearer auth, the fixed locale parameters,
    /// the caller's query, and rate limiting.
    ///
    /// Retries up to `MAX_RETRIES` times on HTTP 429. A JSON `null` body
    /// fails with `TmdbError::EmptyPayload`.
    #[instrument(skip_all, fields(path = tracing::field::Empty))]
    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(String, String)],
    ) -> Result<T> {
        // A leading slash would make `Url::join` drop the `/3/` prefix.
        let path = path.trim_start_matches('/');
        tracing::Span::current().record("path", path);

        let url = self
            .base_url
            .join(path)
            .with_context(|| format!("failed to join URL path: {path}"))?;

        self.rate_limiter.lock().await.wait().await;

        let mut retries = 0u32;
        loop {
            let request = self
                .http_client
                .get(url.clone())
                .bearer_auth(&self.api_token)
                .header(header::ACCEPT, "application/json")
                .query(&[("language", &self.language), ("region", &self.region)])
                .query(params)
                .build()
                .with_context(|| format!("failed to build request: {path}"))?;

            tracing::debug!(url = %request.url(), "TMDB API request");

            let response = self
                .http_client
                .execute(request)
                .await
                .with_context(|| format!("request failed: {path}"))?;

            let status = response.status();

            if status == StatusCode::TOO_MANY_REQUESTS {
                retries = retries.saturating_add(1);
                if retries > MAX_RETRIES {
                    return Err(TmdbError::RateLimited {
                        retries: MAX_RETRIES,
                        path: String::from(path),
                    }
                    .into());
                }
                tracing::warn!(
                    retry = retries,
                    max_retries = MAX_RETRIES,
                    "TMDB API rate limited (429). Retrying..."
                );
                tokio::time::sleep(RETRY_BACKOFF.saturating_mul(retries)).await;
                self.rate_limiter.lock().await.wait().await;
                continue;
            }

            if !status.is_success() {
                let body = response
                    .text()
                    .await
                    .unwrap_or_else(|_| String::from("<failed to read body>"));
                let message = serde_json::from_str::<TmdbErrorResponse>(&body).map_or(
                    body,
                    |e| format!("code={}, message={}", e.status_code, e.status_message),
                );
                return Err(TmdbError::Status { status, message }.into());
            }

            let body = response
                .text()
                .await
                .with_context(|| format!("failed to read response body: {path}"))?;
            let parsed: Option<T> = serde_json::from_str(&body)
                .with_context(|| format!("failed to decode JSON response: {path}"))?;
            return parsed.ok_or_else(|| {
                TmdbError::EmptyPayload {
                    path: String::from(path),
                }
                .into()
            });
        }
    }
}

impl LocalTmdbApi for TmdbClient {
    #[instrument(skip_all)]
    async fn movie_list(
        &self,
        path: &str,
        params: &[(String, String)],
    ) -> Result<TmdbMovieListResponse> {
        self.get_json(path, params).await
    }

    #[instrument(skip_all, fields(movie_id = movie_id))]
    async fn movie_details(&self, movie_id: u64) -> Result<TmdbMovieDetails> {
        self.get_json(&format!("movie/{movie_id}"), &[]).await
    }

    #[instrument(skip_all, fields(movie_id = movie_id))]
    async fn movie_credits(&self, movie_id: u64) -> Result<TmdbMovieCredits> {
        self.get_json(&format!("movie/{movie_id}/credits"), &[])
            .await
    }
}
