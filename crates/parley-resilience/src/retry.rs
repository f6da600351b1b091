use std::{fmt::Display, future::Future, time::Duration};

/// Bounded retry with pure exponential backoff
///
/// An operation is attempted up to `max_retries + 1` times. The wait after
/// failed attempt `k` (counting from zero) is `base_delay * 2^k`, with no
/// jitter and no cap. Every error is retried; the error of the final attempt
/// is returned as-is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    max_retries: u32,
    base_delay: Duration,
}

impl RetryPolicy {
    pub const fn new(max_retries: u32, base_delay: Duration) -> Self {
        Self {
            max_retries,
            base_delay,
        }
    }

    pub const fn max_retries(&self) -> u32 {
        self.max_retries
    }

    pub const fn base_delay(&self) -> Duration {
        self.base_delay
    }

    /// Backoff after the zero-based failed `attempt`
    pub fn delay_for(&self, attempt: u32) -> Duration {
        2u32.checked_pow(attempt)
            .and_then(|factor| self.base_delay.checked_mul(factor))
            .unwrap_or(Duration::MAX)
    }

    /// Run `operation` until it succeeds or the retries are used up
    ///
    /// `name` identifies the operation in retry warnings.
    pub async fn run<T, E, F, Fut>(&self, name: &str, mut operation: F) -> Result<T, E>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: Display,
    {
        let attempts = self.max_retries.saturating_add(1);
        let mut attempt = 0;

        loop {
            match operation().await {
                Ok(value) => return Ok(value),
                Err(e) if attempt >= self.max_retries => return Err(e),
                Err(e) => {
                    let delay = self.delay_for(attempt);

                    tracing::warn!(
                        operation = name,
                        error = %e,
                        "attempt {}/{attempts} failed for {name}, retrying in {:.1}s",
                        attempt + 1,
                        delay.as_secs_f64(),
                    );

                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
            }
        }
    }
}
