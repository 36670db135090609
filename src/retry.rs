//! Retry wrapper for operations that may hit a transient network failure.
//!
//! Only errors that classify as [`ErrorKind::Network`](crate::error::ErrorKind::Network)
//! are retried. Everything else (not found, validation, remote rejections)
//! propagates on the first attempt.

use crate::error::Classify;
use std::future::Future;
use std::time::Duration;
use tracing::warn;

/// Configuration for retry behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Retries after the first attempt (0 = no retries).
    pub max_retries: u32,
    /// Fixed pause between attempts.
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            delay: Duration::from_secs(1),
        }
    }
}

impl RetryPolicy {
    pub fn new(max_retries: u32, delay: Duration) -> Self {
        Self { max_retries, delay }
    }

    /// A policy that makes a single attempt.
    pub fn none() -> Self {
        Self::new(0, Duration::ZERO)
    }

    pub fn should_retry(&self, attempt: u32) -> bool {
        attempt < self.max_retries
    }
}

/// Runs `operation`, retrying network failures according to `policy`.
///
/// `operation` is called once per attempt, so it must build a fresh future
/// each time. The last error is returned once retries are exhausted.
pub async fn with_retry<T, E, F, Fut>(policy: &RetryPolicy, name: &str, mut operation: F) -> Result<T, E>
where
    E: Classify + std::fmt::Display,
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    let mut attempt = 0;
    loop {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(e) if e.is_network() && policy.should_retry(attempt) => {
                attempt += 1;
                warn!(
                    operation = name,
                    attempt,
                    max_retries = policy.max_retries,
                    error = %e,
                    "Network request failed, retrying"
                );
                tokio::time::sleep(policy.delay).await;
            }
            Err(e) => return Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use std::sync::atomic::{AtomicU32, Ordering};
    use tokio::time::Instant;

    #[derive(Debug, thiserror::Error, PartialEq)]
    #[error("{0}")]
    struct Fail(ErrorKind);

    impl Classify for Fail {
        fn kind(&self) -> ErrorKind {
            self.0
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_network_failures_are_retried_with_fixed_delay() {
        let calls = AtomicU32::new(0);
        let counter = &calls;
        let started = Instant::now();

        let result = with_retry(&RetryPolicy::default(), "lookup", move || async move {
            if counter.fetch_add(1, Ordering::SeqCst) < 2 {
                Err(Fail(ErrorKind::Network))
            } else {
                Ok("found")
            }
        })
        .await;

        assert_eq!(result, Ok("found"));
        assert_eq!(calls.load(Ordering::SeqCst), 3);
        assert_eq!(started.elapsed(), Duration::from_secs(2));
    }

    #[tokio::test(start_paused = true)]
    async fn test_gives_up_after_max_retries() {
        let calls = AtomicU32::new(0);
        let counter = &calls;

        let result: Result<(), _> = with_retry(&RetryPolicy::default(), "lookup", move || async move {
            counter.fetch_add(1, Ordering::SeqCst);
            Err(Fail(ErrorKind::Network))
        })
        .await;

        assert_eq!(result, Err(Fail(ErrorKind::Network)));
        assert_eq!(calls.load(Ordering::SeqCst), 4);
    }

    #[tokio::test(start_paused = true)]
    async fn test_other_errors_are_not_retried() {
        for kind in [ErrorKind::NotFound, ErrorKind::Validation, ErrorKind::Remote] {
            let calls = AtomicU32::new(0);
            let counter = &calls;
            let started = Instant::now();

            let result: Result<(), _> = with_retry(&RetryPolicy::default(), "lookup", move || async move {
                counter.fetch_add(1, Ordering::SeqCst);
                Err(Fail(kind))
            })
            .await;

            assert_eq!(result, Err(Fail(kind)));
            assert_eq!(calls.load(Ordering::SeqCst), 1);
            assert_eq!(started.elapsed(), Duration::ZERO);
        }
    }
}
