//! @ai:module:intent Bounded retry with capped exponential backoff for provider calls
//! @ai:module:layer application
//! @ai:module:public_api RetryPolicy
//! @ai:module:stateless true

use crate::config::RunConfig;
use crate::error::ProviderError;
use std::future::Future;
use std::time::Duration;

/// @ai:intent Retry limits for one question's provider call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    max_attempts: u32,
    initial_delay: Duration,
    max_delay: Duration,
}

impl RetryPolicy {
    /// @ai:intent Create a policy; at least one attempt is always made
    /// @ai:effects pure
    pub fn new(max_attempts: u32, initial_delay: Duration, max_delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            initial_delay,
            max_delay,
        }
    }

    /// @ai:effects pure
    pub fn from_config(run: &RunConfig) -> Self {
        Self::new(run.max_attempts, run.initial_backoff(), run.max_backoff())
    }

    /// @ai:intent Sleep after the given failed attempt (1-based), doubling each time
    /// @ai:post result <= max_delay
    /// @ai:effects pure
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let factor = 1u32
            .checked_shl(attempt.saturating_sub(1))
            .unwrap_or(u32::MAX);

        self.initial_delay
            .saturating_mul(factor)
            .min(self.max_delay)
    }

    /// @ai:intent Run op until it succeeds, fails terminally, or attempts run out
    /// @ai:post None means the question failed terminally; the error was logged, not returned
    /// @ai:effects time, io
    pub async fn run<T, F, Fut>(&self, question_index: u32, mut op: F) -> Option<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, ProviderError>>,
    {
        let mut attempt = 1;

        loop {
            match op().await {
                Ok(value) => return Some(value),
                Err(e) if attempt < self.max_attempts && e.is_transient() => {
                    let delay = self.delay_for(attempt);
                    tracing::warn!(
                        "Q{}: attempt {}/{} failed, retrying in {:?}: {}",
                        question_index,
                        attempt,
                        self.max_attempts,
                        delay,
                        e
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(e) => {
                    tracing::error!(
                        "Q{}: FAILED after {} attempts: {}",
                        question_index,
                        attempt,
                        e
                    );
                    return None;
                }
            }
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::from_config(&RunConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};
    use tokio::time::Instant;

    fn transient() -> ProviderError {
        ProviderError::Status {
            status: 429,
            body: "rate limited".to_string(),
        }
    }

    #[test]
    fn test_delays_double_up_to_ceiling() {
        let policy = RetryPolicy::default();

        assert_eq!(policy.delay_for(1), Duration::from_secs(2));
        assert_eq!(policy.delay_for(2), Duration::from_secs(4));
        assert_eq!(policy.delay_for(4), Duration::from_secs(16));
        assert_eq!(policy.delay_for(5), Duration::from_secs(30));
        assert_eq!(policy.delay_for(64), Duration::from_secs(30));
    }

    #[tokio::test(start_paused = true)]
    async fn test_fails_twice_then_succeeds() {
        let policy = RetryPolicy::new(3, Duration::from_secs(2), Duration::from_secs(30));
        let calls = Arc::new(Mutex::new(Vec::new()));

        let result = policy
            .run(7, || {
                let calls = calls.clone();
                async move {
                    let mut calls = calls.lock().unwrap();
                    calls.push(Instant::now());
                    if calls.len() < 3 {
                        Err(transient())
                    } else {
                        Ok("B".to_string())
                    }
                }
            })
            .await;

        assert_eq!(result.as_deref(), Some("B"));

        let calls = calls.lock().unwrap();
        assert_eq!(calls.len(), 3);
        assert_eq!(calls[1] - calls[0], Duration::from_secs(2));
        assert_eq!(calls[2] - calls[1], Duration::from_secs(4));
    }

    #[tokio::test(start_paused = true)]
    async fn test_backoff_respects_ceiling() {
        let policy = RetryPolicy::new(3, Duration::from_secs(2), Duration::from_secs(3));
        let start = Instant::now();

        let result: Option<()> = policy.run(1, || async { Err(transient()) }).await;

        assert!(result.is_none());
        // 2s after the first failure, then 4s capped to 3s; no sleep after the last
        assert_eq!(start.elapsed(), Duration::from_secs(5));
    }

    #[tokio::test(start_paused = true)]
    async fn test_exhausted_attempts_return_none() {
        let policy = RetryPolicy::default();
        let attempts = Arc::new(Mutex::new(0));

        let result: Option<String> = policy
            .run(3, || {
                let attempts = attempts.clone();
                async move {
                    *attempts.lock().unwrap() += 1;
                    Err(ProviderError::EmptyResponse)
                }
            })
            .await;

        assert!(result.is_none());
        assert_eq!(*attempts.lock().unwrap(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_terminal_error_is_not_retried() {
        let policy = RetryPolicy::default();
        let attempts = Arc::new(Mutex::new(0));
        let start = Instant::now();

        let result: Option<String> = policy
            .run(4, || {
                let attempts = attempts.clone();
                async move {
                    *attempts.lock().unwrap() += 1;
                    Err(ProviderError::Status {
                        status: 401,
                        body: "unauthorized".to_string(),
                    })
                }
            })
            .await;

        assert!(result.is_none());
        assert_eq!(*attempts.lock().unwrap(), 1);
        assert_eq!(start.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_attempts_still_calls_once() {
        let policy = RetryPolicy::new(0, Duration::from_secs(1), Duration::from_secs(1));
        let attempts = Arc::new(Mutex::new(0));

        let result: Option<String> = policy
            .run(4, || {
                let attempts = attempts.clone();
                async move {
                    *attempts.lock().unwrap() += 1;
                    Err(transient())
                }
            })
            .await;

        assert!(result.is_none());
        assert_eq!(*attempts.lock().unwrap(), 1);
    }
}
