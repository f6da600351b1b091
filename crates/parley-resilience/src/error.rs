use thiserror::Error;

/// Errors building rate limiters and retry policies
#[derive(Debug, Error)]
pub enum ResilienceError {
    /// Configuration error
    #[error("resilience configuration error: {0}")]
    Config(String),
}
