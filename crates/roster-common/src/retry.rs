//! Generic retry policy with jittered backoff
//!
//! Parameterizes the persistence-write retry loop: max attempts, a uniform
//! backoff distribution, and a retryable-error predicate supplied by the
//! caller. Used by the reconciler for transactional contention.

use std::future::Future;
use std::time::Duration;

use rand::Rng;
use tracing::warn;

/// Retry policy: bounded attempts with uniform random backoff
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    max_attempts: u32,
    backoff_min: Duration,
    backoff_max: Duration,
}

impl RetryPolicy {
    /// Create a policy with explicit bounds
    ///
    /// Backoff delays are drawn uniformly from `[backoff_min, backoff_max)`.
    #[must_use]
    pub fn new(max_attempts: u32, backoff_min: Duration, backoff_max: Duration) -> Self {
        debug_assert!(max_attempts >= 1);
        debug_assert!(backoff_min < backoff_max);
        Self {
            max_attempts,
            backoff_min,
            backoff_max,
        }
    }

    /// Policy for transactional contention: 3 attempts, jitter in [100ms, 1100ms)
    #[must_use]
    pub fn contention() -> Self {
        Self::new(3, Duration::from_millis(100), Duration::from_millis(1100))
    }

    /// Maximum number of attempts (including the first)
    #[must_use]
    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Run `op`, retrying while `retryable` holds and attempts remain
    ///
    /// The final error is returned unchanged once attempts are exhausted or
    /// the error is not retryable.
    pub async fn run<T, E, F, Fut, P>(&self, retryable: P, mut op: F) -> Result<T, E>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        P: Fn(&E) -> bool,
        E: std::fmt::Display,
    {
        let mut attempt = 1;
        loop {
            match op().await {
                Ok(value) => return Ok(value),
                Err(err) if attempt < self.max_attempts && retryable(&err) => {
                    let delay = self.next_backoff();
                    warn!(
                        attempt,
                        max_attempts = self.max_attempts,
                        delay_ms = delay.as_millis() as u64,
                        error = %err,
                        "Retryable failure, backing off"
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(err) => return Err(err),
            }
        }
    }

    fn next_backoff(&self) -> Duration {
        rand::thread_rng().gen_range(self.backoff_min..self.backoff_max)
    }
}
