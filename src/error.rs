use reqwest::StatusCode;
use thiserror::Error;

/// Outcome of a failed call to DeepL or Contentful.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("HTTP error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Received a non-success status code {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("Unexpected response body: {0}")]
    Decode(String),
}

impl ApiError {
    /// Reads the provider's error body off a failed response.
    pub async fn from_response(resp: reqwest::Response) -> Self {
        let status = resp.status();
        let body = resp
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        ApiError::Status { status, body }
    }
}

pub type Result<T> = std::result::Result<T, ApiError>;
