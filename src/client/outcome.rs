//! Call outcomes
//!
//! Each call ends in exactly one outcome. None of them is retried.

use crate::wire::Value;

#[derive(Debug, Clone, PartialEq)]
pub enum CallOutcome {
    /// The telefunction returned `value`
    Success { value: Value },
    /// The telefunction threw; details are in server logs only
    RemoteException,
    /// No response was received
    ConnectionError,
    /// The telefunction aborted on purpose with `value`
    Abort { value: Value },
}

impl CallOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, CallOutcome::Success { .. })
    }

    /// The returned or aborted value
    pub fn value(&self) -> Option<&Value> {
        match self {
            CallOutcome::Success { value } | CallOutcome::Abort { value } => Some(value),
            CallOutcome::RemoteException | CallOutcome::ConnectionError => None,
        }
    }

    /// Message to surface to the caller of `telefunction` for a failed call.
    pub fn failure_message(&self, telefunction: &str) -> Option<String> {
        match self {
            CallOutcome::Success { .. } => None,
            CallOutcome::RemoteException => Some(format!(
                "The telefunction `{}` threw an error, see server logs.",
                telefunction
            )),
            CallOutcome::ConnectionError => Some("No Server Connection".to_string()),
            CallOutcome::Abort { .. } => Some(format!(
                "The telefunction `{}` threw a `Abort(value)`. The abort `value` is available on the outcome.",
                telefunction
            )),
        }
    }
}
