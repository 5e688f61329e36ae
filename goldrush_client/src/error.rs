use thiserror::Error;

#[derive(Error, Debug)]
pub enum GoldRushError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("JSON parsing failed: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("API error: {message}")]
    ApiError { message: String },

    #[error("Server error (HTTP {status}): {message}")]
    ServerError { status: u16, message: String },

    #[error("Parse error: {message}")]
    ParseError { message: String },

    #[error("Rate limit exceeded")]
    RateLimit,

    #[error("Authentication failed")]
    AuthError,

    #[error("Missing API key")]
    MissingApiKey,

    #[error("Invalid wallet address: {address}")]
    InvalidAddress { address: String },
}

impl GoldRushError {
    /// Rate limits and 5xx responses are worth another attempt
    pub fn is_retryable(&self) -> bool {
        match self {
            GoldRushError::RateLimit | GoldRushError::ServerError { .. } => true,
            GoldRushError::HttpError(e) => e.is_timeout() || e.is_connect(),
            _ => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, GoldRushError>;
