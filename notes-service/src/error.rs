//! Error type for note store operations.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    /// A required field is missing or empty
    #[error("Note validation failed: {0}")]
    Validation(String),

    /// The id is not a well-formed note identifier
    #[error("Invalid note id: {0}")]
    InvalidId(String),

    /// The database could not be reached or returned an error
    #[error("Note store unavailable: {0}")]
    Unavailable(String),
}

impl From<rusqlite::Error> for StoreError {
    fn from(e: rusqlite::Error) -> Self {
        StoreError::Unavailable(e.to_string())
    }
}

pub type StoreResult<T> = Result<T, StoreError>;
