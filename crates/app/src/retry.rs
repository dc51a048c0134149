//! Bounded retry around storage writes that hit lock contention.
//!
//! Only [`GrowboxError::Contention`] is retried. Every other error, including
//! validation failures, is returned on the first attempt. When the budget is
//! exhausted the last contention error is wrapped in
//! [`GrowboxError::StoreUnavailable`].

use std::future::Future;
use std::time::Duration;

use growbox_domain::error::GrowboxError;

/// Retry budget with a fixed delay between attempts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total number of attempts, including the first one.
    pub max_attempts: u32,
    /// Delay before each new attempt.
    pub backoff: Duration,
}

impl Default for RetryPolicy {
    /// Five attempts, one second apart.
    fn default() -> Self {
        Self {
            max_attempts: 5,
            backoff: Duration::from_secs(1),
        }
    }
}

impl RetryPolicy {
    #[must_use]
    pub fn new(max_attempts: u32, backoff: Duration) -> Self {
        Self {
            max_attempts,
            backoff,
        }
    }

    /// Single attempt, no retry.
    #[must_use]
    pub fn once() -> Self {
        Self::new(1, Duration::ZERO)
    }
}

/// Run `operation` until it succeeds, fails with a non-contention error, or
/// the policy's attempts are used up.
///
/// # Errors
///
/// Returns the first non-contention error unchanged, or
/// [`GrowboxError::StoreUnavailable`] once every attempt hit contention.
pub async fn retry_on_contention<F, Fut, T>(
    policy: &RetryPolicy,
    mut operation: F,
) -> Result<T, GrowboxError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, GrowboxError>>,
{
    let max_attempts = policy.max_attempts.max(1);
    let mut attempt = 0;

    loop {
        attempt += 1;
        match operation().await {
            Ok(value) => {
                if attempt > 1 {
                    tracing::debug!(attempt, "storage write succeeded after retry");
                }
                return Ok(value);
            }
            Err(GrowboxError::Contention(source)) => {
                if attempt >= max_attempts {
                    tracing::error!(attempts = attempt, error = %source, "storage still locked, giving up");
                    return Err(GrowboxError::StoreUnavailable {
                        attempts: attempt,
                        source,
                    });
                }
                tracing::warn!(
                    attempt,
                    max_attempts,
                    backoff_ms = policy.backoff.as_millis(),
                    error = %source,
                    "storage locked, retrying"
                );
                tokio::time::sleep(policy.backoff).await;
            }
            Err(err) => return Err(err),
        }
    }
}
