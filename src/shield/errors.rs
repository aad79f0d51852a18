//! Shield error types
//!
//! Every shield error is a usage error: a defect in how shields were
//! declared or consulted, never a per-call outcome. A failed validation is a
//! `Verdict::Invalid`, not one of these.

use thiserror::Error;

/// Result type for shield operations
pub type ShieldResult<T> = Result<T, ShieldError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShieldError {
    /// `apply` was called on a telefunction without a shield
    #[error("[shield()] Telefunction `{0}` has no shield attached: check `has_shield()` before applying it.")]
    Missing(String),

    /// A single non-tuple node was given as the argument shield
    #[error("[shield()] Bad shield definition for `{telefunction}`: the shield should be a list of argument schemas, e.g. `vec![ty::string()]` instead of `{given}`. See https://telefunc.com/shield")]
    NotATuple { telefunction: String, given: String },
}

impl ShieldError {
    /// Stable error code
    pub fn code(&self) -> &'static str {
        match self {
            ShieldError::Missing(_) => "TELEFUNC_SHIELD_MISSING",
            ShieldError::NotATuple { .. } => "TELEFUNC_SHIELD_NOT_A_TUPLE",
        }
    }
}
