//! Linear-backoff retry for async operations
//!
//! The delay before attempt `n + 1` is `initial_delay * n`, so with the
//! default configuration a failing operation is tried at t=0, t=1s and t=3s.
//! The backoff sleep is a tokio timer; dropping the returned future cancels
//! the retry loop at whichever await point it is suspended on.

use std::future::Future;
use std::time::Duration;

use tracing::debug;

use crate::error::ErrorClassification;

/// Configuration for [`retry_on_error`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryOnError {
    /// Total number of invocations, including the first. Zero is treated as one.
    pub max_attempts: u32,
    /// Base delay, multiplied by the number of the attempt that just failed
    pub initial_delay: Duration,
}

impl Default for RetryOnError {
    fn default() -> Self {
        Self { max_attempts: 3, initial_delay: Duration::from_secs(1) }
    }
}

impl RetryOnError {
    pub const fn new(max_attempts: u32, initial_delay: Duration) -> Self {
        Self { max_attempts, initial_delay }
    }

    /// Delay to wait after the given (1-based) attempt failed.
    pub fn delay_after(&self, attempt: u32) -> Duration {
        self.initial_delay.saturating_mul(attempt)
    }

    const fn effective_attempts(&self) -> u32 {
        if self.max_attempts == 0 {
            1
        } else {
            self.max_attempts
        }
    }
}

/// Re-invoke `block` while it fails, `should_retry` approves the error and
/// attempts remain.
///
/// Returns the first success, or the last error once attempts are exhausted
/// or `should_retry` returns `false`.
pub async fn retry_on_error<F, Fut, T, E, P>(
    config: RetryOnError,
    mut should_retry: P,
    mut block: F,
) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    P: FnMut(&E) -> bool,
{
    let max_attempts = config.effective_attempts();
    let mut attempt = 1;

    loop {
        match block().await {
            Ok(value) => return Ok(value),
            Err(error) if attempt < max_attempts && should_retry(&error) => {
                let delay = config.delay_after(attempt);
                debug!(
                    attempt,
                    max_attempts,
                    delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                    "operation failed, retrying"
                );
                if !delay.is_zero() {
                    tokio::time::sleep(delay).await;
                }
                attempt += 1;
            }
            Err(error) => return Err(error),
        }
    }
}

/// [`retry_on_error`] using [`ErrorClassification::is_retryable`] as the
/// predicate.
pub async fn retry_retryable<F, Fut, T, E>(config: RetryOnError, block: F) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: ErrorClassification,
{
    retry_on_error(config, |error: &E| error.is_retryable(), block).await
}
