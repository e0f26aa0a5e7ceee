//! Retry policy for storefront detail requests.
//!
//! Throttling (429), server-side failures (5xx) and network errors are retried
//! with exponential backoff. Everything else is returned on the first failure.

use std::future::Future;
use std::time::Duration;

use crate::error::ScraperError;

/// Whether `err` is transient and worth another attempt.
///
/// [`ScraperError::NotFound`], [`ScraperError::MissingProduct`] and
/// deserialization failures would come back identical, so they are not retried.
fn is_retriable(err: &ScraperError) -> bool {
    match err {
        ScraperError::RateLimited { .. } | ScraperError::Http(_) => true,
        ScraperError::UnexpectedStatus { status, .. } => *status >= 500,
        _ => false,
    }
}

/// Seconds to wait before retry number `attempt + 1`.
///
/// `backoff_base_secs * 2^attempt`, raised to the server's `Retry-After` when
/// the error is a 429 asking for longer.
fn backoff_delay_secs(err: &ScraperError, backoff_base_secs: u64, attempt: u32) -> u64 {
    let exponential = backoff_base_secs.saturating_mul(1u64 << attempt.min(62));
    match err {
        ScraperError::RateLimited {
            retry_after_secs, ..
        } => exponential.max(*retry_after_secs),
        _ => exponential,
    }
}

/// Runs `operation`, retrying transient failures up to `max_retries` times.
///
/// With `max_retries = 3` the operation runs at most 4 times. The last error
/// is returned once retries are exhausted.
pub(crate) async fn retry_with_backoff<T, F, Fut>(
    max_retries: u32,
    backoff_base_secs: u64,
    mut operation: F,
) -> Result<T, ScraperError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, ScraperError>>,
{
    let mut attempt = 0u32;

    loop {
        let err = match operation().await {
            Ok(value) => return Ok(value),
            Err(err) => err,
        };
        if !is_retriable(&err) || attempt >= max_retries {
            return Err(err);
        }

        let delay_secs = backoff_delay_secs(&err, backoff_base_secs, attempt);
        tracing::warn!(
            attempt,
            max_retries,
            delay_secs,
            error = %err,
            "transient storefront error, retrying after backoff"
        );
        tokio::time::sleep(Duration::from_secs(delay_secs)).await;
        attempt += 1;
    }
}
