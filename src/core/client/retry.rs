use std::future::Future;
use std::time::Duration;

use crate::core::LcError;

/// Specifies the backoff strategy between attempts.
#[derive(Clone, Debug, PartialEq)]
pub enum Backoff {
    /// Uses a fixed delay between attempts.
    Fixed(Duration),
    /// Uses an exponential delay between attempts.
    /// The delay is calculated as `base * (factor ^ retry)`, capped at `max`.
    Exponential {
        /// The delay before the first retry.
        base: Duration,
        /// The multiplicative factor for each subsequent retry.
        factor: f64,
        /// The maximum duration to wait between attempts.
        max: Duration,
    },
}

impl Backoff {
    /// Delay to wait after the failed attempt number `attempt` (1-based).
    pub fn delay_after(&self, attempt: u32) -> Duration {
        match self {
            Backoff::Fixed(d) => *d,
            Backoff::Exponential { base, factor, max } => {
                let exp = i32::try_from(attempt.saturating_sub(1)).unwrap_or(i32::MAX);
                let secs = base.as_secs_f64() * factor.powi(exp);
                if !secs.is_finite() || secs >= max.as_secs_f64() {
                    *max
                } else {
                    Duration::from_secs_f64(secs)
                }
            }
        }
    }
}

/// Configuration for the automatic retry mechanism.
#[derive(Clone, Debug, PartialEq)]
pub struct RetryConfig {
    /// Enables or disables retries. When disabled exactly one attempt is made.
    pub enabled: bool,
    /// The total number of attempts, including the first one.
    pub max_attempts: u32,
    /// The backoff strategy to use between attempts.
    pub backoff: Backoff,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            max_attempts: 2,
            backoff: Backoff::Fixed(Duration::from_millis(1000)),
        }
    }
}

impl RetryConfig {
    /// A policy that never retries.
    pub fn single_attempt() -> Self {
        Self {
            enabled: false,
            max_attempts: 1,
            backoff: Backoff::Fixed(Duration::ZERO),
        }
    }

    pub(crate) fn attempts(&self) -> u32 {
        if self.enabled { self.max_attempts.max(1) } else { 1 }
    }
}

/// Defines the behavior of the in-memory cache for a lookup.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CacheMode {
    /// Read from the cache if a non-expired entry is present; otherwise, call the remote
    /// service and write a successful result to the cache. (Default)
    Use,
    /// Always call the remote service, bypassing any cached entry, and write a successful result to the cache.
    Refresh,
    /// Always call the remote service and do not read from or write to the cache.
    Bypass,
}

/// Runs `op` until it succeeds or the policy runs out of attempts.
///
/// Attempts are sequential. The backoff delay is slept between attempts only, never after
/// the last one. On exhaustion the error of the final attempt is returned.
pub(crate) async fn run_with_retry<T, F, Fut>(cfg: &RetryConfig, mut op: F) -> Result<T, LcError>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<T, LcError>>,
{
    let attempts = cfg.attempts();
    let mut attempt = 1;
    loop {
        match op(attempt).await {
            Ok(v) => return Ok(v),
            Err(e) if attempt >= attempts => return Err(e),
            Err(_e) => {
                let delay = cfg.backoff.delay_after(attempt);
                #[cfg(feature = "tracing")]
                tracing::warn!(attempt, ?delay, error = %_e, "attempt failed; retrying");
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
        }
    }
}
