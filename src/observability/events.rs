//! Observable events
//!
//! Events are explicit and typed; each one carries its own severity.

use std::fmt;

use super::logger::Severity;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Setup
    /// Telefunction added to the registry
    TelefunctionRegistered,
    /// Shield attached to a telefunction
    ShieldAttached,
    /// Shield replaced an earlier one on the same telefunction
    ShieldOverwritten,
    /// HTTP server bound and ready
    Serving,

    // Server-side calls
    /// Request body decoded
    CallReceived,
    /// Request body could not be decoded
    CallMalformed,
    /// No telefunction under the requested file and name
    TelefunctionNotFound,
    /// Telefunction runs without argument validation
    ShieldMissing,
    /// Arguments failed the shield; telefunction not run
    ShieldRejected,
    /// Telefunction returned a value
    TelefunctionReturned,
    /// Telefunction aborted on purpose
    TelefunctionAborted,
    /// Telefunction threw or panicked
    TelefunctionFailed,

    // Client-side calls
    /// Request sent to the server
    RemoteCallSent,
    /// No response received
    RemoteCallConnectionFailed,
    /// Response contradicts the protocol
    RemoteCallProtocolViolation,
}

impl Event {
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::TelefunctionRegistered => "TELEFUNCTION_REGISTERED",
            Event::ShieldAttached => "SHIELD_ATTACHED",
            Event::ShieldOverwritten => "SHIELD_OVERWRITTEN",
            Event::Serving => "SERVING",

            Event::CallReceived => "CALL_RECEIVED",
            Event::CallMalformed => "CALL_MALFORMED",
            Event::TelefunctionNotFound => "TELEFUNCTION_NOT_FOUND",
            Event::ShieldMissing => "SHIELD_MISSING",
            Event::ShieldRejected => "SHIELD_REJECTED",
            Event::TelefunctionReturned => "TELEFUNCTION_RETURNED",
            Event::TelefunctionAborted => "TELEFUNCTION_ABORTED",
            Event::TelefunctionFailed => "TELEFUNCTION_FAILED",

            Event::RemoteCallSent => "REMOTE_CALL_SENT",
            Event::RemoteCallConnectionFailed => "REMOTE_CALL_CONNECTION_FAILED",
            Event::RemoteCallProtocolViolation => "REMOTE_CALL_PROTOCOL_VIOLATION",
        }
    }

    pub fn severity(&self) -> Severity {
        match self {
            Event::CallReceived
            | Event::TelefunctionReturned
            | Event::TelefunctionAborted
            | Event::RemoteCallSent => Severity::Trace,
            Event::ShieldOverwritten
            | Event::CallMalformed
            | Event::TelefunctionNotFound
            | Event::ShieldMissing
            | Event::ShieldRejected
            | Event::RemoteCallConnectionFailed => Severity::Warn,
            Event::TelefunctionFailed => Severity::Error,
            Event::RemoteCallProtocolViolation => Severity::Fatal,
            _ => Severity::Info,
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
