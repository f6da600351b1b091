#![allow(clippy::must_use_candidate)]

mod env;
mod loader;
pub mod logging;
pub mod output;
pub mod rate_limit;
pub mod tts;

use serde::Deserialize;

pub use logging::*;
pub use output::*;
pub use rate_limit::*;
pub use tts::*;

/// Top-level Parley configuration
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Speech synthesis provider selection and settings
    #[serde(default)]
    pub tts: TtsConfig,
    /// Per-provider request quotas and retry policy
    #[serde(default)]
    pub rate_limits: RateLimitsConfig,
    /// Audio format and file locations
    #[serde(default)]
    pub output: OutputConfig,
    /// Log filter and format
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Rate limit settings for the selected provider
    pub const fn active_rate_limit(&self) -> &ProviderRateLimit {
        self.rate_limits.for_provider(self.tts.provider)
    }
}
