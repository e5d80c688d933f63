//! Cache Statistics Module
//!
//! Tracks cache hits, misses, evictions and write-back outcomes.

use serde::Serialize;

// == Cache Stats ==
/// Tracks cache performance and durability metrics.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    /// Number of lookups answered from memory
    pub hits: u64,
    /// Number of lookups that went to durable storage
    pub misses: u64,
    /// Number of entries evicted due to LRU policy
    pub evictions: u64,
    /// Number of entries written to durable storage
    pub write_backs: u64,
    /// Evictions of clean entries that needed no write
    pub skipped_writes: u64,
    /// Durable writes that failed (entries lost or left dirty)
    pub write_failures: u64,
    /// Durable reads that failed and were reported as absent
    pub read_failures: u64,
    /// Current number of entries in the cache
    pub total_entries: usize,
}

impl CacheStats {
    // == Constructor ==
    /// Creates a new CacheStats with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    // == Hit Rate ==
    /// Calculates the cache hit rate.
    ///
    /// Returns hits / (hits + misses), or 0.0 if no requests have been made.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    pub fn record_eviction(&mut self) {
        self.evictions += 1;
    }

    /// Adds `count` successful durable writes.
    pub fn record_write_backs(&mut self, count: u64) {
        self.write_backs += count;
    }

    pub fn record_skipped_write(&mut self) {
        self.skipped_writes += 1;
    }

    pub fn record_write_failure(&mut self) {
        self.write_failures += 1;
    }

    pub fn record_read_failure(&mut self) {
        self.read_failures += 1;
    }

    pub fn set_total_entries(&mut self, count: usize) {
        self.total_entries = count;
    }
}
