//! # Server Errors
//!
//! Integration errors of the server entry point. They mean the host
//! application wired the handler wrong; they are never sent to the client as
//! a call outcome.

use thiserror::Error;

/// Result type for the server entry point
pub type ServerResult<T> = Result<T, ServerError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ServerError {
    #[error("`handle(request)`: request URL `{got}` does not match the telefunc URL `{expected}`. Only route requests made to `{expected}` to the telefunc handler.")]
    UrlMismatch { expected: String, got: String },

    #[error("`handle(request)`: method `{0}` is not supported: the telefunc handler replies to `GET` and `POST` requests only.")]
    MethodNotSupported(String),
}

impl ServerError {
    pub fn code(&self) -> &'static str {
        match self {
            ServerError::UrlMismatch { .. } => "TELEFUNC_URL_MISMATCH",
            ServerError::MethodNotSupported(_) => "TELEFUNC_METHOD_NOT_SUPPORTED",
        }
    }

    /// Get HTTP status code
    pub fn status_code(&self) -> u16 {
        match self {
            ServerError::UrlMismatch { .. } => 404,
            ServerError::MethodNotSupported(_) => 405,
        }
    }
}
