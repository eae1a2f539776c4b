use crate::utils::proxy_manager::is_proxy_error;
use rand::Rng;
use std::fmt::Display;
use std::future::Future;
use std::time::Duration;
use tracing::{debug, error, warn};

#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub base_delay_ms: u64,
    pub exponential_base: f64,
    pub max_jitter_ms: u64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay_ms: 1000,
            exponential_base: 1.5,
            max_jitter_ms: 500,
        }
    }
}

impl RetryPolicy {
    /// A zero attempt count is treated as one: the operation always runs once.
    pub fn new(max_attempts: u32, base_delay_ms: u64) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            base_delay_ms,
            ..Default::default()
        }
    }

    pub fn with_max_jitter(mut self, max_jitter_ms: u64) -> Self {
        self.max_jitter_ms = max_jitter_ms;
        self
    }

    pub fn without_jitter(mut self) -> Self {
        self.max_jitter_ms = 0;
        self
    }

    /// `base * 1.5^(attempt-1) + jitter`, attempts counted from 1.
    pub fn backoff_delay(&self, attempt: u32, jitter_ms: f64) -> Duration {
        let exponent = attempt.saturating_sub(1) as i32;
        let delay_ms = self.base_delay_ms as f64 * self.exponential_base.powi(exponent);
        Duration::from_millis((delay_ms + jitter_ms.max(0.0)).round() as u64)
    }

    fn jitter_ms(&self) -> f64 {
        if self.max_jitter_ms == 0 {
            return 0.0;
        }
        rand::thread_rng().gen_range(0.0..self.max_jitter_ms as f64)
    }
}

/// Runs `operation` until it succeeds or the policy's attempts are used up.
///
/// Every failure is retried the same way; the proxy classification only
/// enriches the warning. On exhaustion the last error is returned as is.
pub async fn with_retry<T, E, F, Fut>(
    policy: RetryPolicy,
    context: &str,
    mut operation: F,
) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: Display,
{
    let max_attempts = policy.max_attempts.max(1);
    let mut attempt = 1;

    loop {
        let e = match operation().await {
            Ok(result) => {
                if attempt > 1 {
                    debug!(context, "Succeeded on attempt {}/{}", attempt, max_attempts);
                }
                return Ok(result);
            }
            Err(e) => e,
        };

        if attempt >= max_attempts {
            error!(
                context,
                "All {} retry attempts failed. Last error: {}", max_attempts, e
            );
            return Err(e);
        }

        let message = e.to_string();
        if is_proxy_error(&message) {
            warn!(
                context,
                "Proxy error detected: {}. Attempt {}/{}", message, attempt, max_attempts
            );
        }

        let delay = policy.backoff_delay(attempt, policy.jitter_ms());
        warn!(
            context,
            "Attempt {}/{} failed. Retrying in {}ms... Error: {}",
            attempt,
            max_attempts,
            delay.as_millis(),
            message
        );

        tokio::time::sleep(delay).await;
        attempt += 1;
    }
}
