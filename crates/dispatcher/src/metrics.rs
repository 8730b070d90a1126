//! Dispatch counters for diagnostics

use std::sync::atomic::{AtomicU64, Ordering};

/// Cumulative counters across all flushes of one controller
#[derive(Debug, Default)]
pub struct DispatchMetrics {
    /// Batches processed
    batch_count: AtomicU64,
    /// Messages delivered to the chat service
    sent_count: AtomicU64,
    /// Records skipped (no usable recipient)
    skipped_count: AtomicU64,
    /// Failed sends (each aborts its batch)
    failure_count: AtomicU64,
}

impl DispatchMetrics {
    /// Create new metrics instance
    pub fn new() -> Self {
        Self::default()
    }

    /// Get batch count
    pub fn batch_count(&self) -> u64 {
        self.batch_count.load(Ordering::Relaxed)
    }

    /// Increment batch count
    pub fn inc_batch_count(&self) {
        self.batch_count.fetch_add(1, Ordering::Relaxed);
    }

    /// Get sent count
    pub fn sent_count(&self) -> u64 {
        self.sent_count.load(Ordering::Relaxed)
    }

    /// Increment sent count
    pub fn inc_sent_count(&self) {
        self.sent_count.fetch_add(1, Ordering::Relaxed);
    }

    /// Get skipped count
    pub fn skipped_count(&self) -> u64 {
        self.skipped_count.load(Ordering::Relaxed)
    }

    /// Increment skipped count
    pub fn inc_skipped_count(&self) {
        self.skipped_count.fetch_add(1, Ordering::Relaxed);
    }

    /// Get failure count
    pub fn failure_count(&self) -> u64 {
        self.failure_count.load(Ordering::Relaxed)
    }

    /// Increment failure count
    pub fn inc_failure_count(&self) {
        self.failure_count.fetch_add(1, Ordering::Relaxed);
    }

    /// Get snapshot of all metrics
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            batch_count: self.batch_count(),
            sent_count: self.sent_count(),
            skipped_count: self.skipped_count(),
            failure_count: self.failure_count(),
        }
    }
}

/// Snapshot of dispatch metrics (for reporting)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MetricsSnapshot {
    pub batch_count: u64,
    pub sent_count: u64,
    pub skipped_count: u64,
    pub failure_count: u64,
}
