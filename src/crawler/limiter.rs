//! Inter-collection rate limiting
//!
//! The crawl is single-flow, so pacing is a plain cooperative delay between
//! expensive remote operations rather than a token bucket. It exists to
//! avoid request patterns that look automated to the remote side; it has no
//! bearing on the correctness of the data produced.

use std::time::Duration;

/// Enforces a fixed delay between consecutive remote operations.
#[derive(Debug, Clone)]
pub struct RateLimiter {
    delay: Duration,
}

impl RateLimiter {
    /// Creates a limiter with the given fixed delay.
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    /// The configured delay
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Suspends the current task for the configured delay.
    ///
    /// This is a cooperative yield, not a thread block; other tasks (logging,
    /// timers) keep running while the crawl waits.
    pub async fn pace(&self) {
        if self.delay.is_zero() {
            return;
        }
        tracing::debug!("Pacing for {:?} before next remote operation", self.delay);
        tokio::time::sleep(self.delay).await;
    }
}
