use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("unexpected API response (HTTP {status}): {body}")]
    Protocol { status: u16, body: String },

    #[error("failed to parse API response: {0}")]
    Parse(String),

    #[error("failed to encode request body: {0}")]
    Encode(String),

    #[error("invalid base URL {url:?}: {source}")]
    InvalidBaseUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
}
