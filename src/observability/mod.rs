//! Observability subsystem
//!
//! - Structured logging (JSON lines)
//! - Typed events with fixed severities
//! - Lock-free call counters
//!
//! Observability is read-only: a failing log sink never changes the outcome
//! of a call.
//!
//! # Usage
//!
//! ```ignore
//! use telefunc::observability::{log_event_with_fields, Event};
//!
//! log_event_with_fields(Event::ShieldRejected, &[("telefunction", "/a.ts:f")]);
//! ```

mod events;
mod logger;
mod metrics;

pub use events::Event;
pub use logger::{Logger, Severity};
pub use metrics::{CallMetrics, MetricsSnapshot};

/// Log an event at its own severity
pub fn log_event(event: Event) {
    Logger::log(event.severity(), event.as_str(), &[]);
}

/// Log an event with fields at its own severity
pub fn log_event_with_fields(event: Event, fields: &[(&str, &str)]) {
    Logger::log(event.severity(), event.as_str(), fields);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_event() {
        // This just verifies no panic
        log_event(Event::Serving);
        log_event_with_fields(Event::ShieldMissing, &[("telefunction", "/a.ts:f")]);
    }
}
