//! # Wire Errors

use thiserror::Error;

/// Result type for wire operations
pub type WireResult<T> = Result<T, WireError>;

/// Errors raised while encoding or decoding wire payloads
#[derive(Debug, Clone, PartialEq, Error)]
pub enum WireError {
    #[error("Invalid JSON: {0}")]
    InvalidJson(String),

    #[error("Unknown tagged string: {0}")]
    UnknownTag(String),

    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Malformed request body: {0}")]
    MalformedRequest(String),
}

impl WireError {
    /// Stable error code
    pub fn code(&self) -> &'static str {
        match self {
            WireError::InvalidJson(_) => "TELEFUNC_WIRE_INVALID_JSON",
            WireError::UnknownTag(_) => "TELEFUNC_WIRE_UNKNOWN_TAG",
            WireError::InvalidDate(_) => "TELEFUNC_WIRE_INVALID_DATE",
            WireError::MalformedRequest(_) => "TELEFUNC_WIRE_MALFORMED_REQUEST",
        }
    }
}
