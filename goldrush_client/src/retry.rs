use crate::error::GoldRushError;
use std::future::Future;
use std::time::Duration;
use tracing::{debug, error, warn};

/// Delay schedules for retrying GoldRush requests
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Retries after the first attempt
    pub max_retries: u32,
    /// Delays after HTTP 429 (milliseconds)
    pub rate_limit_delays_ms: Vec<u64>,
    /// Delays after 5xx and connection failures (milliseconds)
    pub server_error_delays_ms: Vec<u64>,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            rate_limit_delays_ms: vec![500, 1000, 2000],
            server_error_delays_ms: vec![300, 600, 1200],
        }
    }
}

impl RetryConfig {
    fn delay_for(&self, attempt: u32, error: &GoldRushError) -> Option<Duration> {
        let delays = match error {
            GoldRushError::RateLimit => &self.rate_limit_delays_ms,
            e if e.is_retryable() => &self.server_error_delays_ms,
            _ => return None,
        };

        // Reuse the last delay once the schedule runs out
        delays
            .get(attempt as usize)
            .or_else(|| delays.last())
            .map(|&ms| Duration::from_millis(ms))
    }
}

/// Run a request, retrying rate-limit and server failures on the configured schedule
pub async fn retry_with_backoff<F, Fut, T>(
    mut operation: F,
    config: &RetryConfig,
) -> Result<T, GoldRushError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, GoldRushError>>,
{
    let mut attempt = 0u32;

    loop {
        match operation().await {
            Ok(result) => {
                if attempt > 0 {
                    debug!("✅ Request succeeded after {} retries", attempt);
                }
                return Ok(result);
            }
            Err(e) => {
                if attempt >= config.max_retries {
                    error!("❌ Request failed after {} attempts: {}", attempt + 1, e);
                    return Err(e);
                }

                let Some(delay) = config.delay_for(attempt, &e) else {
                    return Err(e);
                };

                warn!(
                    "⚠️  Request failed (attempt {}/{}): {} - retrying in {}ms",
                    attempt + 1,
                    config.max_retries + 1,
                    e,
                    delay.as_millis()
                );

                tokio::time::sleep(delay).await;
                attempt += 1;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    fn fast_config(max_retries: u32) -> RetryConfig {
        RetryConfig {
            max_retries,
            rate_limit_delays_ms: vec![1, 2],
            server_error_delays_ms: vec![1],
        }
    }

    #[tokio::test]
    async fn test_rate_limit_retried_until_success() {
        let counter = AtomicU32::new(0);
        let attempts = &counter;

        let result = retry_with_backoff(
            move || async move {
                if attempts.fetch_add(1, Ordering::SeqCst) < 2 {
                    Err(GoldRushError::RateLimit)
                } else {
                    Ok(7)
                }
            },
            &fast_config(3),
        )
        .await;

        assert_eq!(result.unwrap(), 7);
        assert_eq!(counter.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_auth_error_not_retried() {
        let counter = AtomicU32::new(0);
        let attempts = &counter;

        let result: Result<(), _> = retry_with_backoff(
            move || async move {
                attempts.fetch_add(1, Ordering::SeqCst);
                Err(GoldRushError::AuthError)
            },
            &fast_config(3),
        )
        .await;

        assert!(matches!(result, Err(GoldRushError::AuthError)));
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_server_errors_exhaust_retries() {
        let counter = AtomicU32::new(0);
        let attempts = &counter;

        let result: Result<(), _> = retry_with_backoff(
            move || async move {
                attempts.fetch_add(1, Ordering::SeqCst);
                Err(GoldRushError::ServerError {
                    status: 503,
                    message: "unavailable".to_string(),
                })
            },
            &fast_config(2),
        )
        .await;

        assert!(matches!(result, Err(GoldRushError::ServerError { status: 503, .. })));
        assert_eq!(counter.load(Ordering::SeqCst), 3); // initial + 2 retries
    }
}
