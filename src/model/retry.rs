/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 19/10/26
******************************************************************************/
use crate::constants::SCHEMA_RETRY_DELAY_SECS;
use crate::utils::config::get_env_or_none;
use std::fmt::Display;
use std::future::Future;
use std::time::Duration;
use tracing::{info, warn};

/// Fixed-backoff retry policy
///
/// Only store initialization at startup is retried; the request path never is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryConfig {
    /// Total number of attempts, the first one included (at least 1)
    pub max_attempts: u32,
    /// Delay in seconds between two attempts (None = `SCHEMA_RETRY_DELAY_SECS`)
    pub retry_delay_secs: Option<u64>,
}

impl RetryConfig {
    /// Creates a policy with `max_attempts` attempts and the default delay
    #[must_use]
    pub fn with_max_attempts(max_attempts: u32) -> Self {
        Self {
            max_attempts,
            retry_delay_secs: None,
        }
    }

    /// Creates a policy with both attempts and delay set
    #[must_use]
    pub fn with_attempts_and_delay(max_attempts: u32, delay_secs: u64) -> Self {
        Self {
            max_attempts,
            retry_delay_secs: Some(delay_secs),
        }
    }

    /// Builds a policy from `{attempts_var}` and `SCHEMA_RETRY_DELAY_SECS`
    #[must_use]
    pub fn from_env(attempts_var: &str, default_attempts: u32) -> Self {
        Self {
            max_attempts: get_env_or_none(attempts_var).unwrap_or(default_attempts),
            retry_delay_secs: get_env_or_none("SCHEMA_RETRY_DELAY_SECS"),
        }
    }

    /// Number of attempts, never less than one
    #[must_use]
    pub fn attempts(&self) -> u32 {
        self.max_attempts.max(1)
    }

    /// Delay between attempts
    #[must_use]
    pub fn delay(&self) -> Duration {
        Duration::from_secs(self.retry_delay_secs.unwrap_or(SCHEMA_RETRY_DELAY_SECS))
    }
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self::with_max_attempts(1)
    }
}

/// Runs `operation` until it succeeds or the policy is exhausted.
///
/// Every failure is logged with the remaining attempts; the last error is
/// returned when no attempt succeeded.
pub async fn retry_with_backoff<T, E, F, Fut>(
    what: &str,
    config: &RetryConfig,
    mut operation: F,
) -> Result<T, E>
where
    E: Display,
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    let attempts = config.attempts();
    let mut attempt = 1;

    loop {
        match operation().await {
            Ok(value) => {
                if attempt > 1 {
                    info!("{} ready after {} attempts", what, attempt);
                }
                return Ok(value);
            }
            Err(e) if attempt < attempts => {
                warn!(
                    "Waiting for {} to be ready... ({}; retries left: {})",
                    what,
                    e,
                    attempts - attempt
                );
                tokio::time::sleep(config.delay()).await;
                attempt += 1;
            }
            Err(e) => return Err(e),
        }
    }
}
