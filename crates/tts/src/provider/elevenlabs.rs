use async_trait::async_trait;
use futures_util::StreamExt;
use parley_config::{ElevenLabsConfig, VoiceMapping};
use parley_core::{AudioFormat, ScriptLine};
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};

use super::{LineSynthesizer, endpoint, error_from_response};
use crate::{
    error::{Result, TtsError},
    http_client::http_client,
};

const DEFAULT_ELEVENLABS_API_URL: &str = "https://api.elevenlabs.io/v1";

/// Output encoding requested from the streaming endpoint
const OUTPUT_FORMAT: &str = "mp3_44100_128";

/// `ElevenLabs` streaming TTS provider
pub struct ElevenLabsProvider {
    client: Client,
    base_url: String,
    api_key: SecretString,
    model: String,
    voices: VoiceMapping,
}

impl ElevenLabsProvider {
    pub fn new(config: &ElevenLabsConfig) -> Result<Self> {
        let api_key = config
            .api_key
            .clone()
            .ok_or_else(|| TtsError::ConfigError("API key required for TTS provider 'elevenlabs'".to_string()))?;

        let base_url = config
            .base_url
            .as_ref()
            .map_or_else(|| DEFAULT_ELEVENLABS_API_URL.to_string(), ToString::to_string);

        Ok(Self {
            client: http_client(),
            base_url,
            api_key,
            model: config.model.clone(),
            voices: config.voices.clone(),
        })
    }

    fn stream_url(&self, voice_id: &str) -> String {
        endpoint(&self.base_url, &format!("text-to-speech/{voice_id}/stream"))
    }
}

#[derive(serde::Serialize)]
struct ElevenLabsRequest<'a> {
    text: &'a str,
    model_id: &'a str,
}

#[async_trait]
impl LineSynthesizer for ElevenLabsProvider {
    async fn synthesize(&self, line: &ScriptLine) -> Result<Vec<u8>> {
        let voice_id = self.voices.for_speaker(line.speaker());
        let url = self.stream_url(voice_id);

        tracing::debug!(
            "ElevenLabs TTS request: model={}, voice={}, input_len={}",
            self.model,
            voice_id,
            line.text().len(),
        );

        let body = ElevenLabsRequest {
            text: line.text(),
            model_id: &self.model,
        };

        let response = self
            .client
            .post(&url)
            .query(&[("output_format", OUTPUT_FORMAT)])
            .header("xi-api-key", self.api_key.expose_secret())
            .header(http::header::ACCEPT, AudioFormat::Mp3.mime_type())
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("ElevenLabs request failed: {e}");
                TtsError::ConnectionError(format!("Failed to send request to ElevenLabs: {e}"))
            })?;

        if !response.status().is_success() {
            return Err(error_from_response("ElevenLabs", response).await);
        }

        // Chunks arrive in playback order; join them into one buffer
        let mut stream = response.bytes_stream();
        let mut audio = Vec::new();
        let mut chunks = 0usize;

        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(|e| {
                tracing::error!("ElevenLabs audio stream interrupted: {e}");
                TtsError::ConnectionError(format!("ElevenLabs audio stream interrupted: {e}"))
            })?;
            audio.extend_from_slice(&chunk);
            chunks += 1;
        }

        if audio.is_empty() {
            return Err(TtsError::InvalidResponse("ElevenLabs returned no audio".to_string()));
        }

        tracing::debug!(
            "ElevenLabs TTS synthesis complete, {} bytes in {chunks} chunk(s)",
            audio.len()
        );

        Ok(audio)
    }

    fn name(&self) -> &str {
        "elevenlabs"
    }
}
