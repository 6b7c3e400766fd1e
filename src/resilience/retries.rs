//! Bounded retry with exponential backoff.
//!
//! # Responsibilities
//! - Re-invoke a failed operation up to `max_retries` additional times
//! - Only absorb failures classified as retryable (network, backend 5xx)
//! - Surface the final failure unchanged
//!
//! # Design Decisions
//! - Attempts are sequential; there is never more than one in flight
//! - `SignRejected` and `BlockhashExpired` are terminal by classification
//!   and always pass straight through

use std::future::Future;

use crate::config::schema::RetryConfig;
use crate::error::ClientResult;
use crate::resilience::backoff::calculate_backoff;

/// Invoke `op`, retrying retryable failures up to `max_retries` additional
/// attempts with exponential backoff between attempts.
pub async fn with_retry<T, F, Fut>(
    mut op: F,
    max_retries: u32,
    policy: &RetryConfig,
) -> ClientResult<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = ClientResult<T>>,
{
    let mut attempt: u32 = 0;
    loop {
        match op().await {
            Ok(value) => return Ok(value),
            Err(err) => {
                if attempt >= max_retries || !err.is_retryable() {
                    return Err(err);
                }
                attempt += 1;
                let delay = calculate_backoff(attempt, policy.base_delay_ms, policy.max_delay_ms);
                tracing::debug!(
                    attempt = attempt,
                    max_retries = max_retries,
                    delay_ms = delay.as_millis() as u64,
                    error = %err,
                    "Retrying after transient failure"
                );
                tokio::time::sleep(delay).await;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ClientError;
    use std::sync::atomic::{AtomicU32, Ordering};

    fn fast_policy() -> RetryConfig {
        RetryConfig {
            max_attempts: 3,
            base_delay_ms: 1,
            max_delay_ms: 5,
        }
    }

    #[tokio::test]
    async fn test_fails_twice_then_succeeds() {
        let calls = AtomicU32::new(0);
        let result = with_retry(
            || {
                let n = calls.fetch_add(1, Ordering::SeqCst);
                async move {
                    if n < 2 {
                        Err(ClientError::Network("connection reset".into()))
                    } else {
                        Ok(42u32)
                    }
                }
            },
            2,
            &fast_policy(),
        )
        .await;

        assert_eq!(result.unwrap(), 42);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_budget_exhausted_surfaces_last_error() {
        let calls = AtomicU32::new(0);
        let result: ClientResult<()> = with_retry(
            || {
                calls.fetch_add(1, Ordering::SeqCst);
                async { Err(ClientError::Network("still down".into())) }
            },
            2,
            &fast_policy(),
        )
        .await;

        assert!(matches!(result, Err(ClientError::Network(_))));
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_non_retryable_error_returns_immediately() {
        let calls = AtomicU32::new(0);
        let result: ClientResult<()> = with_retry(
            || {
                calls.fetch_add(1, Ordering::SeqCst);
                async { Err(ClientError::SignRejected) }
            },
            5,
            &fast_policy(),
        )
        .await;

        assert!(matches!(result, Err(ClientError::SignRejected)));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
