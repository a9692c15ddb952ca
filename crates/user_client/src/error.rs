//! Client error types.

use thiserror::Error;

/// Errors returned by [`crate::UserClient`].
#[derive(Debug, Error)]
pub enum ClientError {
    /// The base URL could not be parsed or joined.
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// Transport or decoding failure.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with an error status.
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },
}

/// Result type for client operations.
pub type ClientResult<T> = Result<T, ClientError>;
