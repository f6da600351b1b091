#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

mod error;
mod http_client;
mod provider;
mod resilient;

pub use error::{Result, TtsError};
pub use provider::{LineSynthesizer, elevenlabs::ElevenLabsProvider, google::GoogleTtsProvider};
pub use resilient::ResilientSynthesizer;

use parley_config::{Config, TtsProviderType};

/// Build the line synthesizer for the configured provider
///
/// The provider is chosen once here; every line of a run goes through the
/// returned synthesizer with the provider's rate limit and retry policy.
pub fn build_synthesizer(config: &Config) -> Result<ResilientSynthesizer> {
    let provider_type = config.tts.provider;

    tracing::debug!("Initializing TTS provider: {provider_type}");

    let provider: Box<dyn LineSynthesizer> = match provider_type {
        TtsProviderType::Google => Box::new(GoogleTtsProvider::new(&config.tts.google, config.output.format)?),
        TtsProviderType::Elevenlabs => Box::new(ElevenLabsProvider::new(&config.tts.elevenlabs)?),
    };

    let limits = config.active_rate_limit();
    let limiter =
        parley_resilience::create_rate_limiter(limits).map_err(|e| TtsError::ConfigError(e.to_string()))?;
    let retry = parley_resilience::create_retry_policy(limits).map_err(|e| TtsError::ConfigError(e.to_string()))?;

    tracing::debug!(
        "TTS provider {provider_type} ready: {} requests/minute, {} retries, {:?} base delay",
        limits.requests_per_minute,
        retry.max_retries(),
        retry.base_delay(),
    );

    Ok(ResilientSynthesizer::new(provider, limiter, retry))
}
