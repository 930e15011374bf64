//! Conversion metrics.
//!
//! Counts engine invocations and their outcomes. Thread-safe via atomics so
//! concurrent exports can record without coordination.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

/// Conversion metrics collector.
#[derive(Debug, Default)]
pub struct ConversionMetrics {
    /// Engine invocations started.
    conversions_started: AtomicU64,
    /// Invocations whose engine exited with code 0.
    conversions_succeeded: AtomicU64,
    /// Invocations whose engine exited non-zero.
    conversions_failed: AtomicU64,
    /// Invocations whose engine process could not be started.
    launch_failures: AtomicU64,
    /// Exports rejected before spawning because the engine is missing.
    missing_engine: AtomicU64,
}

impl ConversionMetrics {
    /// Create a new empty metrics collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an engine invocation start.
    pub fn record_started(&self) {
        self.conversions_started.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a successful conversion.
    pub fn record_success(&self) {
        self.conversions_succeeded.fetch_add(1, Ordering::Relaxed);
    }

    /// Record an engine-reported failure.
    pub fn record_failure(&self) {
        self.conversions_failed.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a launch failure.
    pub fn record_launch_failure(&self) {
        self.launch_failures.fetch_add(1, Ordering::Relaxed);
    }

    /// Record an export rejected by the presence check.
    pub fn record_missing_engine(&self) {
        self.missing_engine.fetch_add(1, Ordering::Relaxed);
    }

    /// Take a point-in-time snapshot.
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            conversions_started: self.conversions_started.load(Ordering::Relaxed),
            conversions_succeeded: self.conversions_succeeded.load(Ordering::Relaxed),
            conversions_failed: self.conversions_failed.load(Ordering::Relaxed),
            launch_failures: self.launch_failures.load(Ordering::Relaxed),
            missing_engine: self.missing_engine.load(Ordering::Relaxed),
        }
    }
}

/// Serializable snapshot of [`ConversionMetrics`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    /// Engine invocations started.
    pub conversions_started: u64,
    /// Successful conversions.
    pub conversions_succeeded: u64,
    /// Engine-reported failures.
    pub conversions_failed: u64,
    /// Launch failures.
    pub launch_failures: u64,
    /// Exports rejected because the engine is missing.
    pub missing_engine: u64,
}

impl MetricsSnapshot {
    /// Invocations that have not yet reached a terminal outcome.
    pub fn in_flight(&self) -> u64 {
        self.conversions_started.saturating_sub(
            self.conversions_succeeded + self.conversions_failed + self.launch_failures,
        )
    }
}
