//! Retry policy for transient Open Brewery DB failures.
//!
//! Network failures, 429 and 5xx responses are retried with exponential
//! back-off and ±25 % jitter. Everything else goes back to the caller on the
//! first failure.

use std::future::Future;
use std::time::Duration;

use brewdb_core::AppConfig;

use crate::error::ClientError;

/// Longest single back-off, before jitter.
pub(crate) const MAX_BACKOFF: Duration = Duration::from_secs(30);

/// Returns `true` for errors that are worth retrying after a back-off delay.
///
/// **Retriable:** timeouts, connection failures, HTTP 429 and 5xx.
///
/// **Not retriable:** 404 and other 4xx, undecodable bodies (the same body
/// would fail again) and a bad base URL.
pub(crate) fn is_retriable(err: &ClientError) -> bool {
    match err {
        ClientError::Http(e) => {
            e.is_timeout() || e.is_connect() || e.status().is_some_and(|s| s.is_server_error())
        }
        ClientError::RateLimited { .. } => true,
        ClientError::UnexpectedStatus { status, .. } => *status >= 500,
        ClientError::NotFound { .. }
        | ClientError::Deserialize { .. }
        | ClientError::InvalidBaseUrl { .. } => false,
    }
}

/// How many times to retry and how long to wait in between.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct RetryPolicy {
    /// Extra attempts after the first failure. `0` disables retries.
    pub(crate) max_retries: u32,
    /// Wait before the first retry; doubles for each later one.
    pub(crate) base_delay: Duration,
    pub(crate) max_delay: Duration,
}

impl RetryPolicy {
    #[must_use]
    pub(crate) fn new(max_retries: u32, base_delay: Duration) -> Self {
        Self {
            max_retries,
            base_delay,
            max_delay: MAX_BACKOFF,
        }
    }

    /// `BREWDB_MAX_RETRIES` and `BREWDB_RETRY_BACKOFF_BASE_MS`.
    #[must_use]
    pub(crate) fn from_config(config: &AppConfig) -> Self {
        Self::new(
            config.max_retries,
            Duration::from_millis(config.retry_backoff_base_ms),
        )
    }

    /// Un-jittered wait before retry number `attempt` (1-based).
    pub(crate) fn backoff(&self, attempt: u32) -> Duration {
        let doublings = attempt.saturating_sub(1).min(16);
        self.base_delay
            .saturating_mul(1 << doublings)
            .min(self.max_delay)
    }

    /// Runs `operation` until it succeeds, fails permanently, or the retry
    /// budget is spent. The last error is returned.
    pub(crate) async fn run<T, F, Fut>(&self, mut operation: F) -> Result<T, ClientError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, ClientError>>,
    {
        let mut attempt = 0u32;
        loop {
            let err = match operation().await {
                Ok(value) => return Ok(value),
                Err(err) => err,
            };
            attempt += 1;
            if attempt > self.max_retries || !is_retriable(&err) {
                return Err(err);
            }

            let delay = jittered(self.backoff(attempt));
            tracing::warn!(
                attempt,
                max_retries = self.max_retries,
                delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                error = %err,
                "transient Open Brewery DB failure, backing off"
            );
            tokio::time::sleep(delay).await;
        }
    }
}

fn jittered(delay: Duration) -> Duration {
    if delay.is_zero() {
        return delay;
    }
    delay.mul_f64(rand::random_range(0.75..=1.25))
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    use super::*;

    fn status(status: u16) -> ClientError {
        ClientError::UnexpectedStatus {
            status,
            url: "http://localhost/v1/breweries".to_owned(),
        }
    }

    fn not_found() -> ClientError {
        ClientError::NotFound {
            url: "http://localhost/v1/breweries/x".to_owned(),
        }
    }

    /// Operation that fails with `errors` in order, then succeeds with the
    /// attempt count. Returns the shared call counter alongside.
    fn scripted(
        errors: Vec<ClientError>,
    ) -> (
        Arc<AtomicU32>,
        impl FnMut() -> std::future::Ready<Result<u32, ClientError>>,
    ) {
        let calls = Arc::new(AtomicU32::new(0));
        let counter = Arc::clone(&calls);
        let mut errors = errors.into_iter();
        let op = move || {
            let attempt = counter.fetch_add(1, Ordering::SeqCst) + 1;
            std::future::ready(errors.next().map_or(Ok(attempt), Err))
        };
        (calls, op)
    }

    #[test]
    fn classifies_transient_failures() {
        assert!(is_retriable(&status(503)));
        assert!(is_retriable(&ClientError::RateLimited {
            url: "http://localhost".to_owned()
        }));
        assert!(!is_retriable(&status(400)));
        assert!(!is_retriable(&not_found()));
        let source = serde_json::from_str::<()>("invalid").unwrap_err();
        assert!(!is_retriable(&ClientError::Deserialize {
            context: "test".to_owned(),
            source,
        }));
    }

    #[test]
    fn backoff_doubles_up_to_the_cap() {
        let policy = RetryPolicy::new(5, Duration::from_millis(500));
        assert_eq!(policy.backoff(1), Duration::from_millis(500));
        assert_eq!(policy.backoff(2), Duration::from_millis(1_000));
        assert_eq!(policy.backoff(3), Duration::from_millis(2_000));
        assert_eq!(policy.backoff(8), MAX_BACKOFF);
        assert_eq!(policy.backoff(u32::MAX), MAX_BACKOFF);
    }

    #[test]
    fn jitter_stays_within_a_quarter() {
        let base = Duration::from_millis(1_000);
        for _ in 0..100 {
            let delay = jittered(base);
            assert!(delay >= Duration::from_millis(750), "{delay:?}");
            assert!(delay <= Duration::from_millis(1_250), "{delay:?}");
        }
        assert_eq!(jittered(Duration::ZERO), Duration::ZERO);
    }

    #[test]
    fn from_config_reads_retry_settings() {
        let config = AppConfig {
            env: brewdb_core::Environment::Test,
            log_level: "info".to_owned(),
            api_base_url: "http://localhost".to_owned(),
            request_timeout_secs: 5,
            user_agent: "brewdb-test".to_owned(),
            max_retries: 4,
            retry_backoff_base_ms: 250,
            per_page: 50,
            search_debounce_ms: 300,
        };
        assert_eq!(
            RetryPolicy::from_config(&config),
            RetryPolicy {
                max_retries: 4,
                base_delay: Duration::from_millis(250),
                max_delay: MAX_BACKOFF,
            }
        );
    }

    #[tokio::test]
    async fn first_success_is_returned_without_retry() {
        let (calls, op) = scripted(Vec::new());
        let result = RetryPolicy::new(3, Duration::ZERO).run(op).await;
        assert_eq!(result.expect("should succeed"), 1);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn transient_failures_are_retried() {
        let (calls, op) = scripted(vec![status(502), status(503)]);
        let result = RetryPolicy::new(3, Duration::ZERO).run(op).await;
        assert_eq!(result.expect("should succeed after retries"), 3);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn gives_up_when_budget_is_spent() {
        let (calls, op) = scripted(vec![status(500), status(500), status(500), status(500)]);
        let result = RetryPolicy::new(2, Duration::ZERO).run(op).await;
        assert_eq!(calls.load(Ordering::SeqCst), 3, "one try plus two retries");
        assert!(matches!(
            result,
            Err(ClientError::UnexpectedStatus { status: 500, .. })
        ));
    }

    #[tokio::test]
    async fn permanent_failure_is_not_retried() {
        let (calls, op) = scripted(vec![not_found()]);
        let result = RetryPolicy::new(3, Duration::ZERO).run(op).await;
        assert_eq!(calls.load(Ordering::SeqCst), 1, "404 must not be retried");
        assert!(matches!(result, Err(ClientError::NotFound { .. })));
    }

    #[tokio::test]
    async fn zero_retries_tries_once() {
        let (calls, op) = scripted(vec![status(503)]);
        let result = RetryPolicy::new(0, Duration::from_secs(1)).run(op).await;
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(result.is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn waits_for_jittered_backoff_between_attempts() {
        let (calls, op) = scripted(vec![status(503), status(503)]);
        let started = tokio::time::Instant::now();

        let result = RetryPolicy::new(2, Duration::from_millis(100)).run(op).await;

        assert_eq!(result.expect("third attempt succeeds"), 3);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
        let waited = started.elapsed();
        assert!(
            waited >= Duration::from_millis(225) && waited <= Duration::from_millis(375),
            "100ms then 200ms, each ±25%: waited {waited:?}"
        );
    }
}
