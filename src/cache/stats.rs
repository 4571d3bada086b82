//! Cache Statistics Module
//!
//! Tracks cache performance metrics including hits, misses, evictions and
//! expirations. Counters are monotonic for the engine's lifetime; gauges
//! (entry count, byte total) live in the store and are merged into the
//! snapshot by the engine.

use std::time::Instant;

use serde::Serialize;

// == Cache Stats ==
/// Monotonic operation counters.
#[derive(Debug, Clone)]
pub struct CacheStats {
    /// Number of successful cache retrievals
    pub hits: u64,
    /// Number of reads that found no live entry
    pub misses: u64,
    /// Number of completed set operations
    pub sets: u64,
    /// Number of explicit deletes that removed an entry
    pub deletes: u64,
    /// Number of entries evicted to make room
    pub evictions: u64,
    /// Number of entries reclaimed because their TTL elapsed
    pub expirations: u64,
    /// Engine start instant, for uptime
    started_at: Instant,
}

impl CacheStats {
    // == Constructor ==
    /// Creates a new CacheStats with all counters at zero.
    pub fn new() -> Self {
        Self {
            hits: 0,
            misses: 0,
            sets: 0,
            deletes: 0,
            evictions: 0,
            expirations: 0,
            started_at: Instant::now(),
        }
    }

    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    pub fn record_set(&mut self) {
        self.sets += 1;
    }

    pub fn record_delete(&mut self) {
        self.deletes += 1;
    }

    pub fn record_eviction(&mut self) {
        self.evictions += 1;
    }

    pub fn record_expiration(&mut self) {
        self.expirations += 1;
    }

    /// Seconds since the engine was constructed.
    pub fn uptime_seconds(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }
}

impl Default for CacheStats {
    fn default() -> Self {
        Self::new()
    }
}

// == Stats Snapshot ==
/// Point-in-time view of the counters together with the store gauges and
/// derived ratios. Taken under the engine lock, so entry count and byte
/// total are mutually consistent.
#[derive(Debug, Clone, Serialize)]
pub struct StatsSnapshot {
    pub hits: u64,
    pub misses: u64,
    pub sets: u64,
    pub deletes: u64,
    pub evictions: u64,
    pub expirations: u64,
    pub current_size: usize,
    pub current_bytes: u64,
    pub max_size: usize,
    pub max_bytes: u64,
    pub hit_ratio: f64,
    pub memory_usage_mb: f64,
    pub uptime_seconds: u64,
    pub policy: String,
}

impl StatsSnapshot {
    /// Hit ratio over a pair of counters: hits / max(1, hits + misses).
    pub fn ratio(hits: u64, misses: u64) -> f64 {
        let total = hits + misses;
        if total == 0 {
            0.0
        } else {
            hits as f64 / total as f64
        }
    }
}
