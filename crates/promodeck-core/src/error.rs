//! Error types for Promodeck.

use thiserror::Error;

/// Result type alias for Promodeck operations.
pub type Result<T> = std::result::Result<T, PromodeckError>;

/// Main error type for the Promodeck workspace.
#[derive(Debug, Error)]
pub enum PromodeckError {
    /// No per-call key and no configured default key.
    #[error("API key is missing: supply one in the form or set GEMINI_API_KEY")]
    MissingApiKey,

    /// Form input rejected before any request was dispatched.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Network request failed.
    #[error("Network error: {0}")]
    NetworkError(String),

    /// The generation service returned an error.
    #[error("Provider error: {0}")]
    ProviderError(String),

    /// The service payload was empty, unparseable, or missing required fields.
    #[error("Malformed brief: {0}")]
    MalformedBrief(String),

    /// Invalid configuration.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Export rendering failed.
    #[error("Render error: {0}")]
    RenderError(String),

    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// IO operation failed.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}
