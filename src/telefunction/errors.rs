//! # Telefunction Errors

use thiserror::Error;

use crate::wire::Value;

/// Result type for registry operations
pub type RegistryResult<T> = Result<T, RegistryError>;

/// Registry errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("Telefunction already registered: {0}")]
    AlreadyExists(String),

    #[error("Telefunction not found: {0}")]
    NotFound(String),
}

impl RegistryError {
    /// Stable error code
    pub fn code(&self) -> &'static str {
        match self {
            RegistryError::AlreadyExists(_) => "TELEFUNCTION_ALREADY_EXISTS",
            RegistryError::NotFound(_) => "TELEFUNCTION_NOT_FOUND",
        }
    }

    /// Get HTTP status code
    pub fn status_code(&self) -> u16 {
        match self {
            RegistryError::AlreadyExists(_) => 409,
            RegistryError::NotFound(_) => 400,
        }
    }
}

/// What a telefunction can throw instead of returning.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TelefunctionError {
    /// Deliberate short-circuit; the value reaches the client.
    #[error("Telefunction aborted with value `{0}`")]
    Abort(Value),

    /// Any other failure; the message stays in server logs.
    #[error("{0}")]
    Failed(String),
}

impl TelefunctionError {
    pub fn failed(message: impl std::fmt::Display) -> Self {
        TelefunctionError::Failed(message.to_string())
    }

    pub fn is_abort(&self) -> bool {
        matches!(self, TelefunctionError::Abort(_))
    }
}

/// Short-circuits a telefunction call: `return Err(abort("not-logged-in"))`.
pub fn abort(value: impl Into<Value>) -> TelefunctionError {
    TelefunctionError::Abort(value.into())
}
