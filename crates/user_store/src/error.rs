//! User store error types.

use thiserror::Error;

/// Unexpected faults raised by a user store.
///
/// Expected outcomes such as an unknown id are reported through `Option` or
/// `bool` return values, and persistence failures are logged inside the
/// store, so neither shows up here.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No identifier is left above the current maximum.
    #[error("Identifier space exhausted")]
    IdSpaceExhausted,

    /// Other error.
    #[error("{0}")]
    Other(String),
}

/// Result type for user store operations.
pub type StoreResult<T> = Result<T, StoreError>;
