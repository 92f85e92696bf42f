//! Retry with exponential backoff

use std::time::Duration;

use tracing::{debug, warn};

use crate::{error::HttpError, Result};

/// Retry configuration
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Retries after the first attempt
    pub max_retries: u32,
    /// Initial delay between retries
    pub initial_delay: Duration,
    /// Maximum delay between retries
    pub max_delay: Duration,
    /// Backoff multiplier
    pub backoff_multiplier: f64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 2,
            initial_delay: Duration::from_millis(250),
            max_delay: Duration::from_secs(5),
            backoff_multiplier: 2.0,
        }
    }
}

impl RetryConfig {
    /// Delay before retry number `retry` (0-based)
    pub fn calculate_delay(&self, retry: u32) -> Duration {
        let delay_ms =
            self.initial_delay.as_millis() as f64 * self.backoff_multiplier.powi(retry as i32);

        std::cmp::min(Duration::from_millis(delay_ms as u64), self.max_delay)
    }
}

/// Re-runs an operation while it fails with a retryable error
///
/// Dropping the future returned by [`RetryMiddleware::execute`] abandons both the
/// attempt in progress and any pending backoff sleep.
#[derive(Debug, Clone, Default)]
pub struct RetryMiddleware {
    config: RetryConfig,
}

impl RetryMiddleware {
    pub fn new(config: RetryConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RetryConfig {
        &self.config
    }

    /// Execute operation with retry logic
    pub async fn execute<F, Fut, T>(&self, operation: F) -> Result<T>
    where
        F: Fn() -> Fut,
        Fut: std::future::Future<Output = Result<T>>,
    {
        let mut retry = 0;
        loop {
            let err = match operation().await {
                Ok(value) => {
                    if retry > 0 {
                        debug!("Request succeeded after {retry} retries");
                    }
                    return Ok(value);
                }
                Err(err) => err,
            };

            if !err.is_retryable() {
                debug!("Non-retryable error: {err}");
                return Err(err);
            }

            if retry >= self.config.max_retries {
                return Err(HttpError::RetryLimitExceeded {
                    attempts: retry + 1,
                    last: Box::new(err),
                });
            }

            let delay = self.config.calculate_delay(retry);
            warn!(
                "Request failed (attempt {}/{}), retrying in {:?}: {}",
                retry + 1,
                self.config.max_retries + 1,
                delay,
                err
            );
            tokio::time::sleep(delay).await;
            retry += 1;
        }
    }
}
