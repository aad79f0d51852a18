//! Call counters
//!
//! - Counters only, monotonic
//! - Reset only on process start
//! - Lock-free

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

/// Counters for calls handled by the server contract
#[derive(Debug, Default)]
pub struct CallMetrics {
    received: AtomicU64,
    malformed: AtomicU64,
    not_found: AtomicU64,
    shield_rejected: AtomicU64,
    succeeded: AtomicU64,
    aborted: AtomicU64,
    failed: AtomicU64,
}

impl CallMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment_received(&self) {
        self.received.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_malformed(&self) {
        self.malformed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_not_found(&self) {
        self.not_found.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_shield_rejected(&self) {
        self.shield_rejected.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_succeeded(&self) {
        self.succeeded.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_aborted(&self) {
        self.aborted.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_failed(&self) {
        self.failed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            received: self.received.load(Ordering::Relaxed),
            malformed: self.malformed.load(Ordering::Relaxed),
            not_found: self.not_found.load(Ordering::Relaxed),
            shield_rejected: self.shield_rejected.load(Ordering::Relaxed),
            succeeded: self.succeeded.load(Ordering::Relaxed),
            aborted: self.aborted.load(Ordering::Relaxed),
            failed: self.failed.load(Ordering::Relaxed),
        }
    }
}

/// A point-in-time copy of all counters
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetricsSnapshot {
    pub received: u64,
    pub malformed: u64,
    pub not_found: u64,
    pub shield_rejected: u64,
    pub succeeded: u64,
    pub aborted: u64,
    pub failed: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_metrics_are_zero() {
        let snapshot = CallMetrics::new().snapshot();
        assert_eq!(snapshot.received, 0);
        assert_eq!(snapshot.failed, 0);
    }

    #[test]
    fn test_increment_counters() {
        let metrics = CallMetrics::new();
        metrics.increment_received();
        metrics.increment_received();
        metrics.increment_shield_rejected();
        metrics.increment_aborted();

        let snapshot = metrics.snapshot();
        assert_eq!(snapshot.received, 2);
        assert_eq!(snapshot.shield_rejected, 1);
        assert_eq!(snapshot.aborted, 1);
        assert_eq!(snapshot.succeeded, 0);
    }

    #[test]
    fn test_snapshot_serializes() {
        let json = serde_json::to_value(CallMetrics::new().snapshot()).unwrap();
        assert_eq!(json["shield_rejected"], 0);
    }
}
