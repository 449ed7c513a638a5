use governor::{DefaultDirectRateLimiter, Quota};
use nonzero_ext::*;
use std::fmt;
use std::time::Duration;
use tracing::trace;

/// Enforces a fixed minimum gap between consecutive outbound requests.
///
/// Owned by the caller and shared across batches; a zero spacing disables throttling.
pub struct RequestThrottle {
    rate_limiter: Option<DefaultDirectRateLimiter>,
    spacing: Duration,
}

impl RequestThrottle {
    pub fn new(spacing: Duration) -> Self {
        let rate_limiter = Quota::with_period(spacing)
            .map(|quota| DefaultDirectRateLimiter::direct(quota.allow_burst(nonzero!(1u32))));
        Self { rate_limiter, spacing }
    }

    pub fn spacing(&self) -> Duration {
        self.spacing
    }

    /// Resolves once the next request may go out.
    pub async fn wait(&self) {
        if let Some(rate_limiter) = &self.rate_limiter {
            rate_limiter.until_ready().await;
            trace!(spacing = ?self.spacing, "Throttle permit acquired");
        }
    }
}

impl fmt::Debug for RequestThrottle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestThrottle").field("spacing", &self.spacing).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    #[tokio::test]
    async fn first_request_is_immediate() {
        let throttle = RequestThrottle::new(Duration::from_secs(5));
        let start = Instant::now();
        throttle.wait().await;
        assert!(start.elapsed() < Duration::from_secs(1));
    }

    #[tokio::test]
    async fn consecutive_requests_are_spaced() {
        let spacing = Duration::from_millis(60);
        let throttle = RequestThrottle::new(spacing);
        let start = Instant::now();
        for _ in 0..3 {
            throttle.wait().await;
        }
        // Two gaps between three permits, small slack for clock granularity
        assert!(start.elapsed() >= Duration::from_millis(110));
    }

    #[tokio::test]
    async fn zero_spacing_never_waits() {
        let throttle = RequestThrottle::new(Duration::ZERO);
        let start = Instant::now();
        for _ in 0..100 {
            throttle.wait().await;
        }
        assert!(start.elapsed() < Duration::from_millis(50));
        assert_eq!(throttle.spacing(), Duration::ZERO);
    }
}
