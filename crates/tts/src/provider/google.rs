//! Google Cloud Text-to-Speech provider

use async_trait::async_trait;
use base64::Engine as _;
use parley_config::{GoogleTtsConfig, GoogleVoices};
use parley_core::{AudioFormat, ScriptLine};
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use super::{LineSynthesizer, endpoint, error_from_response};
use crate::{
    error::{Result, TtsError},
    http_client::http_client,
};

const DEFAULT_GOOGLE_TTS_URL: &str = "https://texttospeech.googleapis.com/v1";

/// Google Cloud Text-to-Speech provider
///
/// Sends one synchronous `text:synthesize` request per line and decodes the
/// base64 audio payload of the response.
pub struct GoogleTtsProvider {
    client: Client,
    url: String,
    api_key: SecretString,
    language_code: String,
    effects_profile_id: Option<String>,
    voices: GoogleVoices,
    encoding: AudioEncoding,
}

impl GoogleTtsProvider {
    /// Create from provider configuration, requesting audio in `format`
    pub fn new(config: &GoogleTtsConfig, format: AudioFormat) -> Result<Self> {
        let api_key = config
            .api_key
            .clone()
            .ok_or_else(|| TtsError::ConfigError("API key required for TTS provider 'google'".to_string()))?;

        let base_url = config
            .base_url
            .as_ref()
            .map_or(DEFAULT_GOOGLE_TTS_URL, url::Url::as_str);

        Ok(Self {
            client: http_client(),
            url: endpoint(base_url, "text:synthesize"),
            api_key,
            language_code: config.language_code.clone(),
            effects_profile_id: config.effects_profile_id.clone(),
            voices: config.voices.clone(),
            encoding: AudioEncoding::for_format(format),
        })
    }

    fn request_body<'a>(&'a self, line: &'a ScriptLine) -> SynthesizeRequest<'a> {
        let voice = self.voices.for_speaker(line.speaker());

        SynthesizeRequest {
            input: SynthesisInput { text: line.text() },
            voice: VoiceSelection {
                language_code: &self.language_code,
                name: &voice.name,
                ssml_gender: voice.ssml_gender.into(),
            },
            audio_config: AudioConfig {
                audio_encoding: self.encoding,
                effects_profile_id: self.effects_profile_id.as_deref().into_iter().collect(),
            },
        }
    }

    /// POST with the key in the `x-goog-api-key` header, never in the URL
    fn build_request(&self, line: &ScriptLine) -> reqwest::RequestBuilder {
        self.client
            .post(&self.url)
            .header("x-goog-api-key", self.api_key.expose_secret())
            .json(&self.request_body(line))
    }
}

/// Encoding requested from Google
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
enum AudioEncoding {
    Mp3,
    /// Uncompressed 16-bit PCM, returned inside a WAV container
    Linear16,
}

impl AudioEncoding {
    const fn for_format(format: AudioFormat) -> Self {
        match format {
            AudioFormat::Mp3 => Self::Mp3,
            AudioFormat::Wav => Self::Linear16,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SynthesizeRequest<'a> {
    input: SynthesisInput<'a>,
    voice: VoiceSelection<'a>,
    audio_config: AudioConfig<'a>,
}

#[derive(Serialize)]
struct SynthesisInput<'a> {
    text: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct VoiceSelection<'a> {
    language_code: &'a str,
    name: &'a str,
    ssml_gender: &'static str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AudioConfig<'a> {
    audio_encoding: AudioEncoding,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    effects_profile_id: Vec<&'a str>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SynthesizeResponse {
    audio_content: String,
}

#[async_trait]
impl LineSynthesizer for GoogleTtsProvider {
    async fn synthesize(&self, line: &ScriptLine) -> Result<Vec<u8>> {
        tracing::debug!(
            "Google TTS request: voice={}, speaker={}, input_len={}",
            self.voices.for_speaker(line.speaker()).name,
            line.speaker(),
            line.text().len(),
        );

        let response = self
            .build_request(line)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Google TTS request failed: {e}");
                TtsError::ConnectionError(format!("Failed to send request to Google TTS: {e}"))
            })?;

        if !response.status().is_success() {
            return Err(error_from_response("Google TTS", response).await);
        }

        let payload: SynthesizeResponse = response.json().await.map_err(|e| {
            tracing::error!("Failed to parse Google TTS response: {e}");
            TtsError::InvalidResponse(format!("unexpected Google TTS response body: {e}"))
        })?;

        let audio = base64::engine::general_purpose::STANDARD
            .decode(payload.audio_content.as_bytes())
            .map_err(|e| TtsError::InvalidResponse(format!("audioContent is not valid base64: {e}")))?;

        if audio.is_empty() {
            return Err(TtsError::InvalidResponse("Google TTS returned no audio".to_string()));
        }

        tracing::debug!("Google TTS synthesis complete, {} bytes", audio.len());

        Ok(audio)
    }

    fn name(&self) -> &str {
        "google"
    }
}
