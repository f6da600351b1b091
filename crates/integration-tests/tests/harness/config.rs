//! Programmatic configuration builder for integration tests

use std::path::Path;

use parley_config::{Config, ProviderRateLimit, TtsProviderType};
use secrecy::SecretString;

/// Builder for constructing test configurations
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Create a builder with chunks under `temp_dir` and fast retries
    pub fn new(temp_dir: &Path) -> Self {
        let mut config = Config::default();
        config.output.temp_audio_dir = temp_dir.to_path_buf();

        let limits = ProviderRateLimit {
            requests_per_minute: 60_000,
            max_retries: 3,
            base_delay: "10ms".to_owned(),
        };
        config.rate_limits.google = limits.clone();
        config.rate_limits.elevenlabs = limits;

        Self { config }
    }

    /// Use Google pointed at a mock backend
    pub fn with_google(mut self, base_url: &str, api_key: &str) -> Self {
        self.config.tts.provider = TtsProviderType::Google;
        self.config.tts.google.api_key = Some(SecretString::from(api_key));
        self.config.tts.google.base_url = Some(base_url.parse().expect("valid URL"));
        self
    }

    /// Use `ElevenLabs` pointed at a mock backend
    pub fn with_elevenlabs(mut self, base_url: &str, api_key: &str) -> Self {
        self.config.tts.provider = TtsProviderType::Elevenlabs;
        self.config.tts.elevenlabs.api_key = Some(SecretString::from(api_key));
        self.config.tts.elevenlabs.base_url = Some(base_url.parse().expect("valid URL"));
        self
    }

    /// Set retries for the selected provider
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.config.rate_limits.google.max_retries = max_retries;
        self.config.rate_limits.elevenlabs.max_retries = max_retries;
        self
    }

    /// Set the request rate for the selected provider
    pub fn with_requests_per_minute(mut self, requests_per_minute: u32) -> Self {
        self.config.rate_limits.google.requests_per_minute = requests_per_minute;
        self.config.rate_limits.elevenlabs.requests_per_minute = requests_per_minute;
        self
    }

    /// Build the final config
    pub fn build(self) -> Config {
        self.config.validate().expect("test config is valid");
        self.config
    }
}
