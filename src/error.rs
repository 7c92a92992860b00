//! Error types.

use thiserror::Error;

use crate::validation::ValidationError;

/// Errors surfaced at the request boundary.
///
/// The scheduling core itself does not fail: understaffing and overload are
/// scored, not raised.
#[derive(Debug, Error)]
pub enum Error {
    /// The request failed validation.
    #[error("invalid request: {}", summarize(.0))]
    InvalidInput(Vec<ValidationError>),

    /// The payload or configuration is not valid JSON for the expected shape.
    #[error("malformed json: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<Vec<ValidationError>> for Error {
    fn from(errors: Vec<ValidationError>) -> Self {
        Error::InvalidInput(errors)
    }
}

fn summarize(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Crate result type.
pub type Result<T> = std::result::Result<T, Error>;
