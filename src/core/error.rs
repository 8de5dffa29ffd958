use thiserror::Error;

/// The primary error type for all fallible operations in this crate.
#[derive(Debug, Error)]
pub enum LcError {
    /// An error occurred during an HTTP request.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// A provided URL could not be parsed.
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// The server returned an unexpected or unsuccessful HTTP status code.
    #[error("HTTP {status} at {url}: {body}")]
    Status {
        /// The HTTP status code.
        status: u16,
        /// The URL that returned the error.
        url: String,
        /// Response body text, if any could be read.
        body: String,
    },

    /// The data received from a remote API was in an unexpected format or was missing a required field.
    #[error("Data format unexpected or missing field: {0}")]
    Data(String),

    /// A response body could not be decoded as JSON.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Required configuration is absent or still holds a placeholder.
    #[error("missing configuration: {0}")]
    Config(String),

    /// The remote service answered but refused the payload.
    #[error("rejected by remote service: {0}")]
    Rejected(String),

    /// A lead was submitted without a positive WhatsApp validation.
    #[error("phone number not validated: {0}")]
    NotValidated(String),
}
