//! Retry with exponential backoff
//!
//! Remote writes are retried a fixed number of times with a deterministic
//! exponential delay (no jitter). Callers pass the operation as a closure so
//! each attempt can rebuild its request from scratch.

use std::future::Future;
use std::time::Duration;

/// Delay before the first retry; doubles on each subsequent one.
pub const RETRY_BASE_DELAY: Duration = Duration::from_millis(300);

/// Run `op`, retrying up to `max_retries` times after the initial attempt.
///
/// The delay before the k-th retry is `RETRY_BASE_DELAY * 2^(k-1)`. Once the
/// retry budget is exhausted the last error is returned unmodified. The
/// operation must be idempotent.
pub async fn with_retry<T, E, F, Fut>(max_retries: u32, mut op: F) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: std::fmt::Display,
{
    let mut attempt: u32 = 0;
    loop {
        match op().await {
            Ok(value) => return Ok(value),
            Err(err) => {
                attempt += 1;
                if attempt > max_retries {
                    return Err(err);
                }
                let delay = RETRY_BASE_DELAY * 2u32.saturating_pow(attempt - 1);
                tracing::warn!(
                    "attempt {}/{} failed ({}), retrying in {:?}",
                    attempt,
                    max_retries + 1,
                    err,
                    delay
                );
                tokio::time::sleep(delay).await;
            }
        }
    }
}
