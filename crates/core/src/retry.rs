//! Retry logic with exponential backoff
//!
//! Wraps any async operation with bounded, sequential retries:
//! - Exponential backoff (delay doubles after every failed attempt)
//! - Optional upper bound and jitter, both off by default
//! - Error classification through [`Retryable`] for callers that must not
//!   retry permanent failures
//!
//! There is no circuit breaking and no coordination between concurrent
//! callers; every call retries on its own schedule.
//!
//! # Example
//!
//! ```rust,no_run
//! use std::time::Duration;
//! use xeluxe_core::retry::retry;
//!
//! # async fn run() -> Result<(), std::io::Error> {
//! let value = retry(
//!     || async { Ok::<_, std::io::Error>("success") },
//!     3,
//!     Duration::from_millis(1000),
//! )
//! .await?;
//! # Ok(())
//! # }
//! ```

use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::future::Future;
use std::time::{Duration, Instant};
use tracing::debug;

/// Retry configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Retries allowed after the first attempt
    pub max_retries: u32,
    /// Delay before the first retry
    pub initial_delay: Duration,
    /// Upper bound for a single delay (`None` = unbounded)
    pub max_delay: Option<Duration>,
    /// Multiplier for exponential backoff
    pub backoff_multiplier: f64,
    /// Add up to 25% random jitter to delays
    pub jitter: bool,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            initial_delay: Duration::from_millis(1000),
            max_delay: None,
            backoff_multiplier: 2.0,
            jitter: false,
        }
    }
}

impl RetryConfig {
    /// Create a config with the given retry count and first delay
    pub fn new(max_retries: u32, initial_delay: Duration) -> Self {
        Self {
            max_retries,
            initial_delay,
            ..Self::default()
        }
    }

    /// Create a config for quick retries
    pub fn quick() -> Self {
        Self {
            max_retries: 2,
            initial_delay: Duration::from_millis(50),
            max_delay: Some(Duration::from_millis(500)),
            backoff_multiplier: 2.0,
            jitter: false,
        }
    }

    /// Create a config for patient retries
    pub fn patient() -> Self {
        Self {
            max_retries: 5,
            initial_delay: Duration::from_millis(500),
            max_delay: Some(Duration::from_secs(30)),
            backoff_multiplier: 2.0,
            jitter: true,
        }
    }

    /// Create a config with no retries
    pub fn no_retry() -> Self {
        Self {
            max_retries: 0,
            initial_delay: Duration::ZERO,
            max_delay: None,
            backoff_multiplier: 1.0,
            jitter: false,
        }
    }

    /// Calculate the delay that precedes retry number `retry` (1-based)
    pub fn delay_for_retry(&self, retry: u32) -> Duration {
        if retry == 0 {
            return Duration::ZERO;
        }

        let exponent = i32::try_from(retry - 1).unwrap_or(i32::MAX);
        let mut delay_secs =
            self.initial_delay.as_secs_f64() * self.backoff_multiplier.powi(exponent);

        if let Some(max_delay) = self.max_delay {
            delay_secs = delay_secs.min(max_delay.as_secs_f64());
        }

        if self.jitter {
            delay_secs *= 1.0 + (rand_simple() * 0.25);
        }

        Duration::try_from_secs_f64(delay_secs).unwrap_or(Duration::MAX)
    }
}

/// Simple pseudo-random number generator (0.0 to 1.0)
fn rand_simple() -> f64 {
    use std::collections::hash_map::RandomState;
    use std::hash::{BuildHasher, Hasher};

    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or_default();

    let mut hasher = RandomState::new().build_hasher();
    hasher.write_u64(nanos);
    (hasher.finish() % 1000) as f64 / 1000.0
}

/// Classifies an error as transient (worth retrying) or permanent
pub trait Retryable {
    /// Whether another attempt could plausibly succeed
    fn is_retryable(&self) -> bool;
}

/// Successful retry result with attempt information
#[derive(Debug)]
pub struct RetryOutcome<T> {
    /// The successful result
    pub value: T,
    /// Number of attempts made (first attempt included)
    pub attempts: u32,
    /// Total time spent, backoff included
    pub total_duration: Duration,
}

/// Run `operation`, retrying any failure up to `max_retries` times.
///
/// The first retry waits `initial_delay`, and each later retry waits twice
/// as long as the one before. When retries run out the last error is
/// returned unchanged.
pub async fn retry<F, Fut, T, E>(
    operation: F,
    max_retries: u32,
    initial_delay: Duration,
) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: Display,
{
    let config = RetryConfig::new(max_retries, initial_delay);
    retry_with(&config, operation, |_| true)
        .await
        .map(|outcome| outcome.value)
}

/// Run `operation` under `config`, retrying only errors the classifier accepts
pub async fn retry_with<F, Fut, T, E, P>(
    config: &RetryConfig,
    mut operation: F,
    should_retry: P,
) -> Result<RetryOutcome<T>, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    P: Fn(&E) -> bool,
    E: Display,
{
    let start = Instant::now();
    let mut retries = 0u32;

    loop {
        match operation().await {
            Ok(value) => {
                return Ok(RetryOutcome {
                    value,
                    attempts: retries + 1,
                    total_duration: start.elapsed(),
                });
            }
            Err(e) => {
                if retries >= config.max_retries || !should_retry(&e) {
                    debug!(
                        attempts = retries + 1,
                        error = %e,
                        "Operation failed, not retrying"
                    );
                    return Err(e);
                }

                retries += 1;
                let delay = config.delay_for_retry(retries);
                debug!(
                    retry = retries,
                    delay_ms = delay.as_millis() as u64,
                    error = %e,
                    "Operation failed, retrying after delay"
                );
                tokio::time::sleep(delay).await;
            }
        }
    }
}

/// Run `operation` under `config`, retrying transient failures only
pub async fn retry_transient<F, Fut, T, E>(
    config: &RetryConfig,
    operation: F,
) -> Result<RetryOutcome<T>, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: Display + Retryable,
{
    retry_with(config, operation, |e: &E| e.is_retryable()).await
}
