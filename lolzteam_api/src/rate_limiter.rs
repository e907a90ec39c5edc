//! Minimum-delay pacing between consecutive requests.
//!
//! The limiter remembers when the previous successful request completed and makes the
//! next dispatch wait until `min_delay` has passed since then. The
//! read-then-write on the timestamp is not atomic across concurrent callers:
//! a client shared between tasks without external synchronization can fire
//! two requests inside one delay window.

use std::sync::Mutex;
use std::time::Duration;

use tokio::time::{sleep, Instant};

pub struct RateLimiter {
    /// Completion time of the previous request.
    last_request: Mutex<Option<Instant>>,
    min_delay: Duration,
}

impl RateLimiter {
    pub fn new(min_delay: Duration) -> Self {
        Self {
            last_request: Mutex::new(None),
            min_delay,
        }
    }

    pub(crate) fn min_delay(&self) -> Duration {
        self.min_delay
    }

    pub fn last_request(&self) -> Option<Instant> {
        *self.last_request.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// How long the next request has to wait; zero before the first one.
    pub fn compute_wait_duration(&self) -> Duration {
        wait_after(self.last_request(), Instant::now(), self.min_delay())
    }

    /// Sleeps for [`compute_wait_duration`](Self::compute_wait_duration).
    pub async fn wait(&self) {
        let wait = self.compute_wait_duration();
        if !wait.is_zero() {
            tracing::debug!("rate limiter delaying request by {:.2}s", wait.as_secs_f64());
            sleep(wait).await;
        }
    }

    /// Records that a request has just completed successfully.
    pub fn mark_completed(&self) {
        *self.last_request.lock().unwrap_or_else(|e| e.into_inner()) = Some(Instant::now());
    }
}

impl std::fmt::Debug for RateLimiter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RateLimiter")
            .field("last_request", &self.last_request())
            .field("min_delay", &self.min_delay)
            .finish()
    }
}

fn wait_after(last: Option<Instant>, now: Instant, min_delay: Duration) -> Duration {
    match last {
        Some(last) => min_delay.saturating_sub(now.saturating_duration_since(last)),
        None => Duration::ZERO,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wait_is_remaining_delay() {
        let now = Instant::now();
        let delay = Duration::from_secs(3);
        let one_sec_ago = now.checked_sub(Duration::from_secs(1)).unwrap();
        let five_secs_ago = now.checked_sub(Duration::from_secs(5)).unwrap();

        assert_eq!(wait_after(Some(one_sec_ago), now, delay), Duration::from_secs(2));
        assert_eq!(wait_after(Some(five_secs_ago), now, delay), Duration::ZERO);
        assert_eq!(wait_after(None, now, delay), Duration::ZERO);
    }

    #[tokio::test]
    async fn first_request_does_not_wait() {
        let limiter = RateLimiter::new(Duration::from_secs(3));
        assert_eq!(limiter.compute_wait_duration(), Duration::ZERO);
        assert!(limiter.last_request().is_none());
    }

    #[tokio::test]
    async fn wait_shrinks_as_time_passes() {
        tokio::time::pause();

        let limiter = RateLimiter::new(Duration::from_secs(3));
        limiter.mark_completed();
        assert_eq!(limiter.compute_wait_duration(), Duration::from_secs(3));

        tokio::time::advance(Duration::from_secs(1)).await;
        assert_eq!(limiter.compute_wait_duration(), Duration::from_secs(2));

        tokio::time::advance(Duration::from_secs(4)).await;
        assert_eq!(limiter.compute_wait_duration(), Duration::ZERO);
    }

    #[tokio::test]
    async fn wait_sleeps_for_the_remaining_delay() {
        tokio::time::pause();

        let limiter = RateLimiter::new(Duration::from_secs(3));
        limiter.mark_completed();
        tokio::time::advance(Duration::from_millis(500)).await;

        let start = Instant::now();
        limiter.wait().await;
        let waited = start.elapsed();
        assert!(waited >= Duration::from_millis(2500));
        assert!(waited < Duration::from_millis(2600));
    }

    #[tokio::test]
    async fn mark_completed_moves_the_window() {
        tokio::time::pause();

        let limiter = RateLimiter::new(Duration::from_secs(2));
        limiter.mark_completed();
        tokio::time::advance(Duration::from_secs(2)).await;
        assert_eq!(limiter.compute_wait_duration(), Duration::ZERO);

        limiter.mark_completed();
        assert_eq!(limiter.compute_wait_duration(), Duration::from_secs(2));
    }
}
