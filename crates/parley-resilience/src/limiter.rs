use std::{num::NonZeroU32, sync::Arc, time::Duration};

use governor::{
    DefaultDirectRateLimiter, Quota,
    clock::{Clock, DefaultClock},
};

use crate::error::ResilienceError;

/// Minimum-spacing limiter for calls to a single provider
///
/// Consecutive calls to [`RateLimiter::acquire`] return at least
/// `60 / requests_per_minute` seconds apart, measured from the previous
/// dispatch. Clones share the same state, so every caller of one provider
/// must go through clones of one limiter.
#[derive(Clone)]
pub struct RateLimiter {
    limiter: Arc<DefaultDirectRateLimiter>,
    min_interval: Duration,
}

impl RateLimiter {
    /// Create a limiter allowing `max_per_minute` calls per minute
    pub fn per_minute(max_per_minute: u32) -> Result<Self, ResilienceError> {
        let rate = NonZeroU32::new(max_per_minute)
            .ok_or_else(|| ResilienceError::Config("requests per minute must be > 0".to_string()))?;

        let min_interval = Duration::from_secs(60) / rate.get();

        // A burst of one cell makes GCRA a pure minimum-spacing limiter
        let quota = Quota::with_period(min_interval)
            .ok_or_else(|| ResilienceError::Config("invalid rate limit period".to_string()))?;

        Ok(Self {
            limiter: Arc::new(DefaultDirectRateLimiter::direct(quota)),
            min_interval,
        })
    }

    /// Wait until the next call may be dispatched, then claim the slot
    pub async fn acquire(&self) {
        match self.limiter.check() {
            Ok(()) => {}
            Err(not_until) => {
                let wait = not_until.wait_time_from(DefaultClock::default().now());
                tracing::debug!("rate limit reached, waiting {}ms", wait.as_millis());

                self.limiter.until_ready().await;
            }
        }
    }

    /// Minimum time between two dispatches
    pub const fn min_interval(&self) -> Duration {
        self.min_interval
    }
}

impl std::fmt::Debug for RateLimiter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RateLimiter")
            .field("min_interval", &self.min_interval)
            .finish_non_exhaustive()
    }
}
