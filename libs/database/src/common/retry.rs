use std::future::Future;
use std::time::Duration;
use tracing::{debug, warn};

use super::error::{DatabaseError, DatabaseResult};

/// Retry configuration for database connections
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Maximum number of retry attempts
    pub max_retries: u32,

    /// Initial delay between retries in milliseconds
    pub initial_delay_ms: u64,

    /// Maximum delay between retries in milliseconds
    pub max_delay_ms: u64,

    /// Multiplier for exponential backoff
    pub backoff_multiplier: f64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 5,
            initial_delay_ms: 200,
            max_delay_ms: 5000,
            backoff_multiplier: 2.0,
        }
    }
}

/// Run `operation` until it succeeds or `config.max_retries` attempts fail,
/// sleeping with exponential backoff between attempts.
pub async fn retry_with_backoff<T, F, Fut>(
    config: &RetryConfig,
    label: &str,
    mut operation: F,
) -> DatabaseResult<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = DatabaseResult<T>>,
{
    let mut delay_ms = config.initial_delay_ms;
    let max_retries = config.max_retries.max(1);

    for attempt in 1..=max_retries {
        match operation().await {
            Ok(value) => {
                if attempt > 1 {
                    debug!(attempt, label, "operation succeeded after retry");
                }
                return Ok(value);
            }
            Err(e) if attempt < max_retries => {
                warn!(
                    attempt,
                    max_retries,
                    delay_ms,
                    label,
                    error = %e,
                    "operation failed, retrying"
                );
                tokio::time::sleep(Duration::from_millis(delay_ms)).await;
                delay_ms = ((delay_ms as f64 * config.backoff_multiplier) as u64)
                    .min(config.max_delay_ms);
            }
            Err(e) => {
                return Err(DatabaseError::ConnectionFailed(format!(
                    "{} failed after {} attempts: {}",
                    label, max_retries, e
                )));
            }
        }
    }

    unreachable!("retry loop always returns")
}
