//! Router metrics for observability
//!
//! Counts written events, the write and flush failures that logging
//! handles absorb instead of surfacing to the host application, and caller
//! fields replaced by reserved document keys.

use std::sync::atomic::{AtomicU64, Ordering};

/// Metrics for router observability
///
/// # Example
///
/// ```
/// use rust_log_router::RouterMetrics;
///
/// let metrics = RouterMetrics::new();
///
/// metrics.record_written();
/// metrics.record_write_failure();
///
/// assert_eq!(metrics.written_count(), 1);
/// assert_eq!(metrics.write_failures(), 1);
/// ```
#[derive(Debug)]
pub struct RouterMetrics {
    /// Entries delivered to every sink that accepted them
    written: AtomicU64,

    /// Entries where at least one accepting sink failed to write
    write_failures: AtomicU64,

    /// Flush calls that returned an error
    flush_failures: AtomicU64,

    /// Entries rejected by every sink during check
    rejected: AtomicU64,

    /// Caller fields replaced by a reserved document key
    key_collisions: AtomicU64,
}

impl RouterMetrics {
    /// Create a new metrics instance with all counters at zero
    pub const fn new() -> Self {
        Self {
            written: AtomicU64::new(0),
            write_failures: AtomicU64::new(0),
            flush_failures: AtomicU64::new(0),
            rejected: AtomicU64::new(0),
            key_collisions: AtomicU64::new(0),
        }
    }

    #[inline]
    pub fn written_count(&self) -> u64 {
        self.written.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn write_failures(&self) -> u64 {
        self.write_failures.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn flush_failures(&self) -> u64 {
        self.flush_failures.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn rejected_count(&self) -> u64 {
        self.rejected.load(Ordering::Relaxed)
    }

    /// Record a fully delivered entry, returning the previous count
    #[inline]
    pub fn key_collisions(&self) -> u64 {
        self.key_collisions.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn record_written(&self) -> u64 {
        self.written.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_write_failure(&self) -> u64 {
        self.write_failures.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_flush_failure(&self) -> u64 {
        self.flush_failures.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_rejected(&self) -> u64 {
        self.rejected.fetch_add(1, Ordering::Relaxed)
    }

    /// Failed writes as a percentage (0.0 - 100.0) of attempted writes
    #[inline]
    pub fn record_key_collision(&self) -> u64 {
        self.key_collisions.fetch_add(1, Ordering::Relaxed)
    }

    pub fn failure_rate(&self) -> f64 {
        let failed = self.write_failures() as f64;
        let total = self.written_count() as f64 + failed;
        if total == 0.0 {
            0.0
        } else {
            (failed / total) * 100.0
        }
    }

    /// Reset all counters to zero
    pub fn reset(&self) {
        self.written.store(0, Ordering::Relaxed);
        self.write_failures.store(0, Ordering::Relaxed);
        self.flush_failures.store(0, Ordering::Relaxed);
        self.rejected.store(0, Ordering::Relaxed);
        self.key_collisions.store(0, Ordering::Relaxed);
    }
}

impl Default for RouterMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for RouterMetrics {
    /// Snapshot of the current values
    fn clone(&self) -> Self {
        Self {
            written: AtomicU64::new(self.written_count()),
            write_failures: AtomicU64::new(self.write_failures()),
            flush_failures: AtomicU64::new(self.flush_failures()),
            rejected: AtomicU64::new(self.rejected_count()),
            key_collisions: AtomicU64::new(self.key_collisions()),
        }
    }
}
