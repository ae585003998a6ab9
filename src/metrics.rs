//! Dispatch outcome counters

use std::sync::atomic::{AtomicU64, Ordering};

/// Lock-free counters for command dispatch outcomes
#[derive(Debug, Default)]
pub struct DispatchMetrics {
    /// Commands routed, regardless of outcome
    pub dispatched: AtomicU64,
    /// Soft-fail commands dropped because their manager was absent
    pub soft_dropped: AtomicU64,
    /// Completion handles failed because their manager was absent
    pub unavailable_failures: AtomicU64,
    /// Handler faults contained by the worker
    pub handler_panics: AtomicU64,
}

impl DispatchMetrics {
    pub fn record_dispatched(&self) {
        self.dispatched.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_soft_dropped(&self) {
        self.soft_dropped.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_unavailable_failure(&self) {
        self.unavailable_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_handler_panic(&self) {
        self.handler_panics.fetch_add(1, Ordering::Relaxed);
    }

    /// Consistent-enough point-in-time view of the counters
    pub fn snapshot(&self) -> DispatchMetricsSnapshot {
        DispatchMetricsSnapshot {
            dispatched: self.dispatched.load(Ordering::Relaxed),
            soft_dropped: self.soft_dropped.load(Ordering::Relaxed),
            unavailable_failures: self.unavailable_failures.load(Ordering::Relaxed),
            handler_panics: self.handler_panics.load(Ordering::Relaxed),
        }
    }
}

/// Point-in-time copy of [`DispatchMetrics`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispatchMetricsSnapshot {
    pub dispatched: u64,
    pub soft_dropped: u64,
    pub unavailable_failures: u64,
    pub handler_panics: u64,
}
