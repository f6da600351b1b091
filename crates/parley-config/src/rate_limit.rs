use serde::Deserialize;

use crate::TtsProviderType;

/// Request quotas and retry policy, one entry per provider
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RateLimitsConfig {
    #[serde(default)]
    pub google: ProviderRateLimit,
    #[serde(default)]
    pub elevenlabs: ProviderRateLimit,
}

impl RateLimitsConfig {
    pub const fn for_provider(&self, provider: TtsProviderType) -> &ProviderRateLimit {
        match provider {
            TtsProviderType::Google => &self.google,
            TtsProviderType::Elevenlabs => &self.elevenlabs,
        }
    }
}

/// Rate limit and retry settings for a single provider
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProviderRateLimit {
    /// Maximum synthesis calls per minute
    #[serde(default = "default_requests_per_minute")]
    pub requests_per_minute: u32,
    /// Retries after the first failed attempt
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
    /// Delay before the first retry, doubled for each one after (e.g. "2s", "500ms")
    #[serde(default = "default_base_delay")]
    pub base_delay: String,
}

impl Default for ProviderRateLimit {
    fn default() -> Self {
        Self {
            requests_per_minute: default_requests_per_minute(),
            max_retries: default_max_retries(),
            base_delay: default_base_delay(),
        }
    }
}

const fn default_requests_per_minute() -> u32 {
    20
}

const fn default_max_retries() -> u32 {
    10
}

fn default_base_delay() -> String {
    "2s".to_owned()
}
