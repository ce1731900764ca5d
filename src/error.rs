use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApiError {
    /// The request never produced a usable response.
    #[error("network error: {0}")]
    Network(String),

    /// The body was not JSON, or not the shape we expected.
    #[error("unexpected response: {0}")]
    Parse(String),

    /// The backend answered with its own `{ "error": ... }` body.
    #[error("upstream error: {0}")]
    Upstream(String),

    /// A mutation came back with a non-success envelope.
    #[error("{0}")]
    Rejected(String),
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ApiError::Parse(err.to_string())
        } else {
            ApiError::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Parse(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ApiError>;
