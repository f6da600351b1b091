use std::path::Path;

use parley_core::AudioFormat;
use secrecy::{ExposeSecret, SecretString};

use crate::{Config, ProviderRateLimit, TtsProviderType};

impl Config {
    /// Load configuration from a TOML file
    ///
    /// Reads the file, expands `{{ env.VAR }}` placeholders, then
    /// deserializes and validates the result.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, environment variable
    /// expansion fails, TOML parsing fails, or validation fails
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("failed to read config file {}: {e}", path.display()))?;

        Self::from_toml(&raw)
    }

    /// Parse and validate configuration from TOML text
    ///
    /// # Errors
    ///
    /// Returns an error if expansion, parsing, or validation fails
    pub fn from_toml(raw: &str) -> anyhow::Result<Self> {
        let expanded =
            crate::env::expand_env(raw).map_err(|e| anyhow::anyhow!("config variable expansion failed: {e}"))?;

        let config: Self = toml::from_str(&expanded).map_err(|e| anyhow::anyhow!("failed to parse config: {e}"))?;

        config.validate()?;

        Ok(config)
    }

    /// Validate that the configuration is usable for a run
    ///
    /// Only the selected provider needs credentials; settings for the
    /// other provider may stay at their defaults.
    ///
    /// # Errors
    ///
    /// Returns an error describing the first invalid setting
    pub fn validate(&self) -> anyhow::Result<()> {
        self.validate_provider()?;
        validate_rate_limit(self.tts.provider, self.active_rate_limit())?;
        Ok(())
    }

    fn validate_provider(&self) -> anyhow::Result<()> {
        let provider = self.tts.provider;

        match provider {
            TtsProviderType::Google => {
                let google = &self.tts.google;
                require_api_key(provider, google.api_key.as_ref())?;

                if google.language_code.trim().is_empty() {
                    anyhow::bail!("tts.google.language_code must not be empty");
                }
                if google.voices.interviewer.name.trim().is_empty() || google.voices.interviewee.name.trim().is_empty() {
                    anyhow::bail!("tts.google.voices must name a voice for both speakers");
                }
            }
            TtsProviderType::Elevenlabs => {
                let elevenlabs = &self.tts.elevenlabs;
                require_api_key(provider, elevenlabs.api_key.as_ref())?;

                if elevenlabs.model.trim().is_empty() {
                    anyhow::bail!("tts.elevenlabs.model must not be empty");
                }
                if elevenlabs.voices.interviewer.trim().is_empty() || elevenlabs.voices.interviewee.trim().is_empty() {
                    anyhow::bail!("tts.elevenlabs.voices must name a voice for both speakers");
                }
                if self.output.format != AudioFormat::Mp3 {
                    anyhow::bail!(
                        "the elevenlabs provider only produces mp3, but output.format is '{}'",
                        self.output.format
                    );
                }
            }
        }

        Ok(())
    }
}

fn require_api_key(provider: TtsProviderType, key: Option<&SecretString>) -> anyhow::Result<()> {
    if key.is_none_or(|k| k.expose_secret().trim().is_empty()) {
        anyhow::bail!("tts.{provider}.api_key is required when tts.provider = \"{provider}\"");
    }
    Ok(())
}

fn validate_rate_limit(provider: TtsProviderType, limit: &ProviderRateLimit) -> anyhow::Result<()> {
    if limit.requests_per_minute == 0 {
        anyhow::bail!("rate_limits.{provider}.requests_per_minute must be greater than 0");
    }

    duration_str::parse(&limit.base_delay)
        .map_err(|e| anyhow::anyhow!("invalid rate_limits.{provider}.base_delay '{}': {e}", limit.base_delay))?;

    Ok(())
}
