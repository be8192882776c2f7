//! User-facing fetch failures.

use reqwest::StatusCode;

use crate::tmdb::TmdbError;

/// Why a movie fetch failed, as shown to the user.
///
/// The categories are deliberately coarse: TMDB's own error codes are
/// kept in the logged `anyhow` chain, not here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    /// HTTP 401.
    #[error("API認証に失敗しました")]
    Unauthorized,
    /// HTTP 404.
    #[error("リソースが見つかりませんでした")]
    NotFound,
    /// Any other HTTP status or a transport failure.
    #[error("APIリクエストに失敗しました")]
    RequestFailed,
    /// Absent or malformed payload.
    #[error("APIからデータを取得できませんでした")]
    NoData,
    /// Anything else.
    #[error("予期せぬエラーが発生しました")]
    Unexpected,
}

impl FetchError {
    /// Classifies an error chain returned by a `LocalTmdbApi` call.
    #[must_use]
    pub fn classify(err: &anyhow::Error) -> Self {
        if let Some(tmdb) = err.chain().find_map(|c| c.downcast_ref::<TmdbError>()) {
            return match tmdb.status() {
                Some(StatusCode::UNAUTHORIZED) => Self::Unauthorized,
                Some(StatusCode::NOT_FOUND) => Self::NotFound,
                Some(_) => Self::RequestFailed,
                None => Self::NoData,
            };
        }
        if err.chain().any(|c| c.is::<reqwest::Error>()) {
            return Self::RequestFailed;
        }
        if err.chain().any(|c| c.is::<serde_json::Error>()) {
            return Self::NoData;
        }
        Self::Unexpected
    }
}
