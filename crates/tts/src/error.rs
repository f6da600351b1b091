use thiserror::Error;

pub type Result<T, E = TtsError> = std::result::Result<T, E>;

/// Errors from speech synthesis providers
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TtsError {
    /// Request could not be sent or the response body could not be read
    #[error("connection error: {0}")]
    ConnectionError(String),

    /// Provider rejected the credentials
    #[error("authentication failed: {0}")]
    AuthenticationFailed(String),

    /// Provider rejected the request as malformed
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Provider quota exceeded
    #[error("rate limited by provider: {0}")]
    RateLimited(String),

    /// Any other non-success status from the provider
    #[error("provider API error ({status}): {message}")]
    ProviderApiError { status: u16, message: String },

    /// Provider answered successfully but the payload is unusable
    #[error("invalid provider response: {0}")]
    InvalidResponse(String),

    /// Provider could not be built from configuration
    #[error("configuration error: {0}")]
    ConfigError(String),
}
