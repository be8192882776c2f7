//! Request pacing for the TMDB API.

use std::time::{Duration, Instant};

/// Default spacing between requests (TMDB allows roughly 40 req/s).
const DEFAULT_MIN_INTERVAL: Duration = Duration::from_millis(25);

/// Enforces a minimum gap between consecutive TMDB requests.
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct TmdbRateLimiter {
    /// Minimum gap between two requests.
    min_interval: Duration,
    /// When the previous request was released.
    last_request: Option<Instant>,
}

impl Default for TmdbRateLimiter {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_INTERVAL)
    }
}

impl TmdbRateLimiter {
    /// Creates a limiter with the given minimum interval.
    pub(crate) const fn new(min_interval: Duration) -> Self {
        Self {
            min_interval,
            last_request: None,
        }
    }

    /// How long a request issued at `now` still has to wait.
    fn remaining(&self, now: Instant) -> Duration {
        self.last_request.map_or(Duration::ZERO, |last| {
            self.min_interval
                .saturating_sub(now.saturating_duration_since(last))
        })
    }

    /// Sleeps until the next request is allowed, then records it.
    pub async fn wait(&mut self) {
        let delay = self.remaining(Instant::now());
        if !delay.is_zero() {
            tracing::trace!(delay_ms = delay.as_millis(), "TMDB request throttled");
            tokio::time::sleep(delay).await;
        }
        self.last_request = Some(Instant::now());
    }
}
