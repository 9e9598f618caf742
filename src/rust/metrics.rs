use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

/// Snapshot of store activity
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoreMetrics {
    /// Records created
    pub creates: u64,
    /// Single-record reads
    pub reads: u64,
    /// Records replaced
    pub updates: u64,
    /// Records deleted
    pub deletes: u64,
    /// Searches run
    pub searches: u64,
    /// Operations that returned a storage error
    pub failures: u64,
}

impl StoreMetrics {
    /// Total number of operations attempted
    pub fn total_operations(&self) -> u64 {
        self.creates + self.reads + self.updates + self.deletes + self.searches
    }
}

/// Thread-safe metrics collector
#[derive(Debug, Default)]
pub struct MetricsCollector {
    creates: AtomicU64,
    reads: AtomicU64,
    updates: AtomicU64,
    deletes: AtomicU64,
    searches: AtomicU64,
    failures: AtomicU64,
}

impl MetricsCollector {
    /// Create a new metrics collector
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_create(&self) {
        self.creates.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_read(&self) {
        self.reads.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_update(&self) {
        self.updates.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_delete(&self) {
        self.deletes.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_search(&self) {
        self.searches.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_failure(&self) {
        self.failures.fetch_add(1, Ordering::Relaxed);
    }

    /// Get current metrics
    pub fn get_metrics(&self) -> StoreMetrics {
        StoreMetrics {
            creates: self.creates.load(Ordering::Relaxed),
            reads: self.reads.load(Ordering::Relaxed),
            updates: self.updates.load(Ordering::Relaxed),
            deletes: self.deletes.load(Ordering::Relaxed),
            searches: self.searches.load(Ordering::Relaxed),
            failures: self.failures.load(Ordering::Relaxed),
        }
    }
}

/// Performance timer for measuring operation durations
pub struct PerformanceTimer {
    start: Instant,
    operation: String,
}

impl PerformanceTimer {
    /// Start timing an operation
    pub fn start(operation: &str) -> Self {
        Self { start: Instant::now(), operation: operation.to_string() }
    }

    /// Finish timing and return the duration
    pub fn finish(self) -> Duration {
        self.start.elapsed()
    }

    /// Finish timing and log the result at debug level
    pub fn finish_and_log(self) -> Duration {
        let operation = self.operation.clone();
        let duration = self.finish();
        log::debug!("Operation '{}' took {:?}", operation, duration);
        duration
    }
}

/// Macro for easy performance timing
#[macro_export]
macro_rules! time_operation {
    ($operation:expr, $code:block) => {{
        let timer = $crate::metrics::PerformanceTimer::start($operation);
        let result = $code;
        timer.finish_and_log();
        result
    }};
}
