use thiserror::Error;

#[derive(Error, Debug)]
pub enum ActivityScoreError {
    #[error("Invalid address format: {0}")]
    InvalidAddress(String),

    #[error("{provider} error: HTTP {status}")]
    SourceStatus { provider: String, status: u16 },

    #[error("{provider} request failed: {message}")]
    SourceRequest { provider: String, message: String },

    #[error("Source not configured: {0}")]
    SourceNotConfigured(String),

    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

pub type Result<T> = std::result::Result<T, ActivityScoreError>;
