use async_trait::async_trait;
use parley_core::ScriptLine;
use parley_resilience::{RateLimiter, RetryPolicy};

use crate::{error::Result, provider::LineSynthesizer};

/// Provider wrapped in retry and rate limiting
///
/// Retry is the outer layer, so every attempt, including retries, waits for
/// its own rate limiter slot before reaching the provider.
pub struct ResilientSynthesizer {
    inner: Box<dyn LineSynthesizer>,
    limiter: RateLimiter,
    retry: RetryPolicy,
}

impl ResilientSynthesizer {
    pub fn new(inner: Box<dyn LineSynthesizer>, limiter: RateLimiter, retry: RetryPolicy) -> Self {
        Self { inner, limiter, retry }
    }

    pub const fn retry_policy(&self) -> &RetryPolicy {
        &self.retry
    }

    pub const fn rate_limiter(&self) -> &RateLimiter {
        &self.limiter
    }
}

#[async_trait]
impl LineSynthesizer for ResilientSynthesizer {
    async fn synthesize(&self, line: &ScriptLine) -> Result<Vec<u8>> {
        let inner = self.inner.as_ref();
        let limiter = &self.limiter;

        self.retry
            .run(inner.name(), move || async move {
                limiter.acquire().await;
                inner.synthesize(line).await
            })
            .await
    }

    fn name(&self) -> &str {
        self.inner.name()
    }
}
