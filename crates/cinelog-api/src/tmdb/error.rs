//! Typed TMDB transport errors.
//!
//! These sit at the root of the `anyhow` chains returned by
//! `TmdbClient` so callers can classify failures with `downcast_ref`.

use reqwest::StatusCode;

/// Failure raised by the TMDB transport.
#[derive(Debug, thiserror::Error)]
#[allow(clippy::module_name_repetitions)]
pub enum TmdbError {
    /// Non-success HTTP status.
    #[error("TMDB API error (HTTP {status}): {message}")]
    Status {
        /// Response status.
        status: StatusCode,
        /// Error detail from the body (or the raw body).
        message: String,
    },
    /// HTTP 429 persisted after all retries.
    #[error("TMDB API rate limit exceeded after {retries} retries: {path}")]
    RateLimited {
        /// Retries performed.
        retries: u32,
        /// Request path.
        path: String,
    },
    /// Response body was JSON `null`.
    #[error("TMDB API returned an empty payload: {path}")]
    EmptyPayload {
        /// Request path.
        path: String,
    },
    /// Response body lacked a field the caller needs.
    #[error("TMDB API response has no `{field}`: {path}")]
    MissingField {
        /// Request path.
        path: String,
        /// Missing field name.
        field: &'static str,
    },
}

impl TmdbError {
    /// Returns the HTTP status associated with this error, if any.
    #[must_use]
    pub const fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::RateLimited { .. } => Some(StatusCode::TOO_MANY_REQUESTS),
            Self::EmptyPayload { .. } | Self::MissingField { .. } => None,
        }
    }
}
