#![allow(clippy::missing_errors_doc, clippy::must_use_candidate)]

mod error;
mod limiter;
mod retry;

pub use error::ResilienceError;
pub use limiter::RateLimiter;
pub use retry::RetryPolicy;

use parley_config::ProviderRateLimit;

/// Create the rate limiter for one provider from configuration
pub fn create_rate_limiter(config: &ProviderRateLimit) -> Result<RateLimiter, ResilienceError> {
    RateLimiter::per_minute(config.requests_per_minute)
}

/// Create the retry policy for one provider from configuration
pub fn create_retry_policy(config: &ProviderRateLimit) -> Result<RetryPolicy, ResilienceError> {
    let base_delay = parse_duration(&config.base_delay)?;
    Ok(RetryPolicy::new(config.max_retries, base_delay))
}

fn parse_duration(s: &str) -> Result<std::time::Duration, ResilienceError> {
    duration_str::parse(s).map_err(|e| ResilienceError::Config(format!("invalid duration '{s}': {e}")))
}
