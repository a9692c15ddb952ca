//! Server error types.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Message returned for unknown user ids.
pub const USER_NOT_FOUND: &str = "User not found";

/// Message returned when a create payload lacks required fields.
pub const REQUIRED_FIELDS: &str = "First name, last name, and email are required";

/// Message returned when a request body is not valid JSON for the endpoint.
pub const INVALID_BODY: &str = "Invalid request body";

/// Message returned for every unexpected fault.
pub const INTERNAL_ERROR: &str = "Internal server error";

/// Server error type.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// Required fields missing from a create payload.
    #[error("Validation failed: {0}")]
    Validation(&'static str),

    /// Request body could not be decoded.
    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(&'static str),

    /// Store fault.
    #[error("Store error: {0}")]
    Store(#[from] user_store::StoreError),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ServerError {
    /// Creates the not-found error for user lookups.
    pub fn user_not_found() -> Self {
        Self::NotFound(USER_NOT_FOUND)
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ServerError::Validation(msg) => (StatusCode::BAD_REQUEST, *msg),
            ServerError::InvalidBody(_) => (StatusCode::BAD_REQUEST, INVALID_BODY),
            ServerError::NotFound(msg) => (StatusCode::NOT_FOUND, *msg),
            ServerError::Store(_) | ServerError::Internal(_) => {
                tracing::error!(error = %self, "Request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR)
            }
        };

        (status, Json(json!({ "message": message }))).into_response()
    }
}

/// Result type alias for server operations.
pub type ServerResult<T> = Result<T, ServerError>;
