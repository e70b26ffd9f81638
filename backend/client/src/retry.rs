//! Retry engine: exponential backoff with jitter for Telegraph API calls.
//!
//! Only transient failures (transport errors, HTTP 429 and 5xx) are retried.
//! Retrying stops when either the attempt budget or the elapsed-time cap is
//! reached, and the last error is returned.

use std::future::Future;
use std::time::{Duration, Instant};

use rand::Rng;
use telegraphcl_core::Result;
use tracing::{debug, warn};

/// Retry policy configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct RetryPolicy {
    /// Maximum number of attempts, including the first one.
    pub max_attempts: u32,
    /// Delay before the second attempt.
    pub base_delay: Duration,
    /// Multiplier for each subsequent wait (exponential factor).
    pub backoff_factor: f64,
    /// Maximum delay between two attempts.
    pub max_delay: Duration,
    /// No new attempt is started once this much time has passed.
    pub max_elapsed: Duration,
    /// Add random jitter (±25% of computed delay).
    pub jitter: bool,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_millis(500),
            backoff_factor: 1.5,
            max_delay: Duration::from_secs(10),
            max_elapsed: Duration::from_secs(60),
            jitter: true,
        }
    }
}

impl RetryPolicy {
    /// Compute the delay after failed attempt `attempt_number` (1-indexed).
    pub fn delay_for(&self, attempt_number: u32) -> Duration {
        if attempt_number == 0 {
            return Duration::ZERO;
        }
        let base_ms = self.base_delay.as_millis() as f64;
        let delay_ms = base_ms * self.backoff_factor.powi((attempt_number - 1) as i32);
        let delay_ms = delay_ms.min(self.max_delay.as_millis() as f64) as u64;

        let delay_ms = if self.jitter && delay_ms >= 4 {
            let jitter = (delay_ms / 4) as i64;
            let offset = rand::thread_rng().gen_range(-jitter..=jitter);
            (delay_ms as i64 + offset).max(0) as u64
        } else {
            delay_ms
        };

        Duration::from_millis(delay_ms)
    }

    pub fn should_retry(&self, attempt_number: u32) -> bool {
        attempt_number < self.max_attempts
    }
}

/// Run `operation` until it succeeds, fails permanently, or the policy is exhausted.
pub async fn retry<T, F, Fut>(policy: &RetryPolicy, label: &str, mut operation: F) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let started = Instant::now();
    let mut attempt = 1;

    loop {
        let error = match operation().await {
            Ok(value) => return Ok(value),
            Err(error) => error,
        };

        if !error.is_transient() {
            debug!(%label, attempt, error = %error, "Request failed permanently");
            return Err(error);
        }
        if !policy.should_retry(attempt) {
            warn!(%label, attempt, max = policy.max_attempts, "Retry attempts exhausted");
            return Err(error);
        }

        let delay = policy.delay_for(attempt);
        if started.elapsed() + delay > policy.max_elapsed {
            warn!(
                %label,
                attempt,
                elapsed_ms = started.elapsed().as_millis() as u64,
                "Retry time budget exhausted"
            );
            return Err(error);
        }

        warn!(
            %label,
            attempt,
            max = policy.max_attempts,
            delay_ms = delay.as_millis() as u64,
            error = %error,
            "Request failed, will retry"
        );
        tokio::time::sleep(delay).await;
        attempt += 1;
    }
}
