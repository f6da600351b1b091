pub mod elevenlabs;
pub mod google;

use async_trait::async_trait;
use parley_core::ScriptLine;

use crate::error::{Result, TtsError};

/// Produces encoded audio for one script line
///
/// Implementations pick the voice for the line's speaker and issue exactly
/// one synthesis request per call.
#[async_trait]
pub trait LineSynthesizer: Send + Sync {
    /// Synthesize a single line into encoded audio bytes
    async fn synthesize(&self, line: &ScriptLine) -> Result<Vec<u8>>;

    /// Provider name used in logs
    fn name(&self) -> &str;
}

#[async_trait]
impl<T: LineSynthesizer + ?Sized> LineSynthesizer for std::sync::Arc<T> {
    async fn synthesize(&self, line: &ScriptLine) -> Result<Vec<u8>> {
        (**self).synthesize(line).await
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

/// Turn a non-success provider response into an error
pub(crate) async fn error_from_response(provider: &str, response: reqwest::Response) -> TtsError {
    let status = response.status();
    let error_text = match response.text().await {
        Ok(text) => text,
        Err(e) => {
            tracing::warn!("Failed to read {provider} error body: {e}");
            format!("unreadable error body: {e}")
        }
    };

    tracing::error!("{provider} API error ({status}): {error_text}");

    match status.as_u16() {
        400 => TtsError::InvalidRequest(error_text),
        401 | 403 => TtsError::AuthenticationFailed(error_text),
        429 => TtsError::RateLimited(error_text),
        code => TtsError::ProviderApiError {
            status: code,
            message: error_text,
        },
    }
}

/// Join a configured base URL and an endpoint path without doubling slashes
pub(crate) fn endpoint(base_url: &str, path: &str) -> String {
    format!("{}/{}", base_url.trim_end_matches('/'), path.trim_start_matches('/'))
}
