use thiserror::Error;

#[derive(Debug, Error)]
pub enum AnthropicError {
    /// An error body returned by the API
    #[error("api error ({error_type}): {message}")]
    Api {
        /// The error type reported by the API
        error_type: String,
        /// The human-readable message
        message: String,
    },
    /// Bad json returned from the API
    #[error("invalid json returned from the api")]
    JsonDeserialize(#[from] serde_json::Error),
    /// Error from reqwest
    #[error("http error")]
    Reqwest(#[from] reqwest::Error),
}

pub type Result<T> = std::result::Result<T, AnthropicError>;
