//! Cache statistics and metrics tracking
//!
//! Counters are lock-free atomics shared between clones of a cache, so they
//! can be read while other threads keep using it.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Point-in-time statistics of a bounded cache
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Current number of entries (expired entries count until touched)
    pub entries: usize,

    /// Current aggregate weight
    pub weight: u64,

    /// Weight budget (None = unbounded)
    pub max_weight: Option<u64>,

    /// Reads that returned a live entry
    pub hits: u64,

    /// Reads that found nothing or an expired entry
    pub misses: u64,

    /// Successful inserts
    pub inserts: u64,

    /// Entries dropped to make room
    pub evictions: u64,

    /// Entries dropped because their TTL elapsed
    pub expirations: u64,

    /// Inserts refused because the entry alone exceeds the budget
    pub rejections: u64,
}

impl CacheStats {
    /// Calculate hit rate (hits / total accesses)
    pub fn hit_rate(&self) -> f64 {
        let total = self.total_accesses();
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    /// Calculate miss rate (misses / total accesses)
    pub fn miss_rate(&self) -> f64 {
        1.0 - self.hit_rate()
    }

    /// Fraction of the weight budget in use
    pub fn fill_ratio(&self) -> Option<f64> {
        self.max_weight.map(|max| if max == 0 { 0.0 } else { self.weight as f64 / max as f64 })
    }

    /// Total number of access operations (hits + misses)
    pub fn total_accesses(&self) -> u64 {
        self.hits + self.misses
    }
}

/// Thread-safe metrics collector for cache operations
#[derive(Debug, Clone, Default)]
pub(crate) struct MetricsCollector {
    counters: Arc<Counters>,
}

#[derive(Debug, Default)]
struct Counters {
    hits: AtomicU64,
    misses: AtomicU64,
    inserts: AtomicU64,
    evictions: AtomicU64,
    expirations: AtomicU64,
    rejections: AtomicU64,
}

impl MetricsCollector {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn record_hit(&self) {
        self.counters.hits.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_miss(&self) {
        self.counters.misses.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_insert(&self) {
        self.counters.inserts.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_eviction(&self) {
        self.counters.evictions.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_expiration(&self) {
        self.counters.expirations.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_rejection(&self) {
        self.counters.rejections.fetch_add(1, Ordering::Relaxed);
    }

    /// Get current statistics snapshot
    pub(crate) fn snapshot(&self, entries: usize, weight: u64, max_weight: Option<u64>) -> CacheStats {
        let c = &self.counters;
        CacheStats {
            entries,
            weight,
            max_weight,
            hits: c.hits.load(Ordering::Relaxed),
            misses: c.misses.load(Ordering::Relaxed),
            inserts: c.inserts.load(Ordering::Relaxed),
            evictions: c.evictions.load(Ordering::Relaxed),
            expirations: c.expirations.load(Ordering::Relaxed),
            rejections: c.rejections.load(Ordering::Relaxed),
        }
    }

    /// Reset all metrics to zero
    pub(crate) fn reset(&self) {
        let c = &self.counters;
        for counter in
            [&c.hits, &c.misses, &c.inserts, &c.evictions, &c.expirations, &c.rejections]
        {
            counter.store(0, Ordering::Relaxed);
        }
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for cache::stats.
    use super::*;

    /// Validates `Default::default` behavior for the hit rate calculation
    /// scenario.
    ///
    /// Assertions:
    /// - Ensures `(stats.hit_rate() - 0.8).abs() < 1e-10` evaluates to true.
    /// - Ensures `(stats.miss_rate() - 0.2).abs() < 1e-10` evaluates to true.
    /// - Confirms `stats.total_accesses()` equals `100`.
    #[test]
    fn test_hit_rate_calculation() {
        let stats = CacheStats { hits: 80, misses: 20, ..Default::default() };

        assert!((stats.hit_rate() - 0.8).abs() < 1e-10);
        assert!((stats.miss_rate() - 0.2).abs() < 1e-10);
        assert_eq!(stats.total_accesses(), 100);
    }

    /// Validates `CacheStats::default` behavior for the hit rate no accesses
    /// scenario.
    ///
    /// Assertions:
    /// - Confirms `stats.hit_rate()` equals `0.0`.
    /// - Confirms `stats.miss_rate()` equals `1.0`.
    #[test]
    fn test_hit_rate_no_accesses() {
        let stats = CacheStats::default();
        assert_eq!(stats.hit_rate(), 0.0);
        assert_eq!(stats.miss_rate(), 1.0);
    }

    /// Validates `Default::default` behavior for the fill ratio scenario.
    ///
    /// Assertions:
    /// - Confirms `stats.fill_ratio()` equals `Some(0.5)`.
    /// - Confirms an unbounded cache reports `None`.
    /// - Confirms a zero budget reports `Some(0.0)`.
    #[test]
    fn test_fill_ratio() {
        let stats = CacheStats { weight: 50, max_weight: Some(100), ..Default::default() };
        assert_eq!(stats.fill_ratio(), Some(0.5));

        let unbounded = CacheStats { weight: 50, max_weight: None, ..Default::default() };
        assert_eq!(unbounded.fill_ratio(), None);

        let zero = CacheStats { weight: 0, max_weight: Some(0), ..Default::default() };
        assert_eq!(zero.fill_ratio(), Some(0.0));
    }

    #[test]
    fn test_metrics_collector_records_and_resets() {
        let collector = MetricsCollector::new();
        collector.record_hit();
        collector.record_hit();
        collector.record_miss();
        collector.record_insert();
        collector.record_eviction();
        collector.record_expiration();
        collector.record_rejection();

        let stats = collector.snapshot(3, 42, Some(100));
        assert_eq!(stats.entries, 3);
        assert_eq!(stats.weight, 42);
        assert_eq!(stats.hits, 2);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.inserts, 1);
        assert_eq!(stats.evictions, 1);
        assert_eq!(stats.expirations, 1);
        assert_eq!(stats.rejections, 1);

        collector.reset();
        assert_eq!(collector.snapshot(0, 0, None), CacheStats::default());
    }

    #[test]
    fn test_metrics_collector_clones_share_counters() {
        let collector = MetricsCollector::new();
        let clone = collector.clone();
        clone.record_hit();
        assert_eq!(collector.snapshot(0, 0, None).hits, 1);
    }
}
