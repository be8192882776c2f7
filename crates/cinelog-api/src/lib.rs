//! API client library for cinelog.
//!
//! Provides the TMDB API client and the movie list / detail
//! retrieval operations built on top of it.

/// Normalized movie types and fetch operations.
pub mod movie_info;

/// TMDB API client.
pub mod tmdb;
