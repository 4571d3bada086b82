//! Cache Engine Module
//!
//! Orchestrates the entry store, eviction index and statistics behind the
//! public operation set. The engine enforces both capacity bounds (entry
//! count and byte budget), funnels every removal path through a single
//! primitive so counters and the index stay in step with the store, and
//! serves the reaper's bounded expiry batches.

use std::collections::HashMap;

use crate::cache::entry::{current_timestamp_ms, estimated_size, CacheEntry};
use crate::cache::index::EvictionIndex;
use crate::cache::store::EntryStore;
use crate::cache::{
    CacheStats, EvictionPolicy, StatsSnapshot, DEFAULT_ENTRY_OVERHEAD, DEFAULT_KEYS_LIMIT,
    MAX_KEY_LENGTH,
};
use crate::error::{CacheError, Result};

/// Why an entry left the store; selects the counter charged for it.
enum Departure {
    Deleted,
    Evicted,
    Expired,
}

// == Cache Engine ==
/// In-memory cache with dual capacity bounds, pluggable eviction and TTL
/// expiry. All operations are synchronous; the caller provides the
/// exclusive region (one engine behind one lock).
#[derive(Debug)]
pub struct CacheEngine {
    /// Key-addressable entry storage
    store: EntryStore,
    /// Policy-specific eviction ordering
    index: EvictionIndex,
    /// Monotonic operation counters
    stats: CacheStats,
    /// Victim-selection policy, fixed at construction
    policy: EvictionPolicy,
    /// Maximum number of entries
    max_entries: usize,
    /// Maximum total bytes
    max_bytes: u64,
    /// Per-entry metadata charge
    entry_overhead: usize,
    /// TTL applied when a set omits one
    default_ttl: Option<u64>,
    /// Set once shutdown begins; public operations are rejected after
    shutting_down: bool,
}

impl CacheEngine {
    // == Constructor ==
    /// Creates a new engine with the given capacity bounds and policy.
    pub fn new(max_entries: usize, max_bytes: u64, policy: EvictionPolicy) -> Self {
        Self {
            store: EntryStore::new(),
            index: EvictionIndex::new(policy),
            stats: CacheStats::new(),
            policy,
            max_entries,
            max_bytes,
            entry_overhead: DEFAULT_ENTRY_OVERHEAD,
            default_ttl: None,
            shutting_down: false,
        }
    }

    /// Sets the TTL applied when a set omits one.
    pub fn with_default_ttl(mut self, ttl: Option<u64>) -> Self {
        self.default_ttl = ttl;
        self
    }

    /// Sets the per-entry overhead charged to the byte budget.
    pub fn with_entry_overhead(mut self, bytes: usize) -> Self {
        self.entry_overhead = bytes;
        self
    }

    // == Get ==
    /// Retrieves a value by key.
    ///
    /// A present but expired entry is removed synchronously and reported as
    /// expired (counted under `expirations`, not `misses`). A live entry has
    /// its recency and frequency metadata bumped before the index is
    /// notified.
    pub fn get(&mut self, key: &str) -> Result<String> {
        self.ensure_accepting()?;
        let now = current_timestamp_ms();

        let expired = match self.store.get(key) {
            Some(entry) => entry.is_expired_at(now),
            None => {
                self.stats.record_miss();
                return Err(CacheError::NotFound(key.to_string()));
            }
        };

        if expired {
            self.remove_entry(key, Departure::Expired);
            return Err(CacheError::Expired(key.to_string()));
        }

        let Some(entry) = self.store.get_mut(key) else {
            self.stats.record_miss();
            return Err(CacheError::NotFound(key.to_string()));
        };
        entry.record_access(now);
        let value = entry.value.clone();
        let meta = entry.meta();

        self.index.touch(key, meta);
        self.stats.record_hit();
        Ok(value)
    }

    // == Set ==
    /// Stores a key-value pair with optional TTL, evicting under the active
    /// policy until both capacity bounds admit the entry.
    ///
    /// Updating an existing key rewrites value, size and expiry, resets the
    /// access count to 1 and re-ranks the entry; its first-insertion time is
    /// preserved. A missing `ttl` falls back to the configured default, or
    /// clears any prior expiry when no default is set.
    pub fn set(&mut self, key: &str, value: String, ttl: Option<u64>) -> Result<()> {
        self.ensure_accepting()?;
        validate_key(key)?;
        if ttl == Some(0) {
            return Err(CacheError::InvalidTtl(
                "ttl must be a positive number of seconds".to_string(),
            ));
        }

        let now = current_timestamp_ms();
        let size_bytes = estimated_size(key, &value, self.entry_overhead);
        if size_bytes > self.max_bytes {
            return Err(CacheError::EntryTooLarge {
                size_bytes,
                max_bytes: self.max_bytes,
            });
        }
        let ttl = ttl.or(self.default_ttl);

        if let Some(first_created) = self.store.get(key).map(|entry| entry.created_at) {
            let mut entry = CacheEntry::new(value, now, ttl, size_bytes);
            entry.created_at = first_created;
            let meta = entry.meta();

            self.index.remove(key);
            self.store.insert(key.to_string(), entry);
            self.index.insert(key, meta);

            // A grown value can breach the byte budget; shrink back under it.
            // The refreshed entry is itself eligible if the policy ranks it.
            while self.store.total_bytes() > self.max_bytes {
                self.evict_one(now)?;
            }
        } else {
            while self.store.len() + 1 > self.max_entries
                || self.store.total_bytes() + size_bytes > self.max_bytes
            {
                self.evict_one(now)?;
            }

            let entry = CacheEntry::new(value, now, ttl, size_bytes);
            let meta = entry.meta();
            self.store.insert(key.to_string(), entry);
            self.index.insert(key, meta);
        }

        self.stats.record_set();
        Ok(())
    }

    // == Delete ==
    /// Removes an entry by key. Returns whether an entry was removed.
    pub fn delete(&mut self, key: &str) -> Result<bool> {
        self.ensure_accepting()?;
        Ok(self.remove_entry(key, Departure::Deleted))
    }

    // == Clear ==
    /// Removes all entries and returns how many were removed. Monotonic
    /// counters are not reset.
    pub fn clear(&mut self) -> Result<usize> {
        self.ensure_accepting()?;
        let removed = self.store.clear();
        self.index = EvictionIndex::new(self.policy);
        Ok(removed)
    }

    // == Keys ==
    /// Returns up to `limit` keys, optionally filtered by an anchored glob
    /// pattern (`*` any substring, `?` one character). Expired entries are
    /// skipped; reclaiming them is left to lazy reads and the reaper.
    pub fn keys(&self, pattern: Option<&str>, limit: Option<usize>) -> Result<Vec<String>> {
        self.ensure_accepting()?;
        let now = current_timestamp_ms();
        let limit = limit.unwrap_or(DEFAULT_KEYS_LIMIT);

        let mut keys = Vec::new();
        for (key, entry) in self.store.iter() {
            if keys.len() >= limit {
                break;
            }
            if entry.is_expired_at(now) {
                continue;
            }
            if pattern.map_or(true, |p| glob_match(p, key)) {
                keys.push(key.clone());
            }
        }
        Ok(keys)
    }

    // == Batch Operations ==
    /// Looks up several keys, returning found key-value pairs. Each lookup
    /// goes through `get`, so hit/miss/expiration accounting applies per key.
    pub fn get_many(&mut self, keys: &[String]) -> Result<HashMap<String, String>> {
        self.ensure_accepting()?;
        let mut values = HashMap::new();
        for key in keys {
            if let Ok(value) = self.get(key) {
                values.insert(key.clone(), value);
            }
        }
        Ok(values)
    }

    /// Stores several key-value pairs with one TTL applied uniformly.
    /// Returns the number of successful stores; failed keys are skipped.
    pub fn set_many(&mut self, items: HashMap<String, String>, ttl: Option<u64>) -> Result<usize> {
        self.ensure_accepting()?;
        let mut stored = 0;
        for (key, value) in items {
            if self.set(&key, value, ttl).is_ok() {
                stored += 1;
            }
        }
        Ok(stored)
    }

    // == Stats ==
    /// Point-in-time statistics snapshot. Available during shutdown so
    /// monitoring can observe the drain.
    pub fn stats(&self) -> StatsSnapshot {
        StatsSnapshot {
            hits: self.stats.hits,
            misses: self.stats.misses,
            sets: self.stats.sets,
            deletes: self.stats.deletes,
            evictions: self.stats.evictions,
            expirations: self.stats.expirations,
            current_size: self.store.len(),
            current_bytes: self.store.total_bytes(),
            max_size: self.max_entries,
            max_bytes: self.max_bytes,
            hit_ratio: StatsSnapshot::ratio(self.stats.hits, self.stats.misses),
            memory_usage_mb: self.store.total_bytes() as f64 / (1024.0 * 1024.0),
            uptime_seconds: self.stats.uptime_seconds(),
            policy: self.policy.to_string(),
        }
    }

    // == Reap Expired ==
    /// Removes up to `max` expired entries, crediting `expirations`.
    ///
    /// Under the TTL policy the expiry heap hands candidates back in expiry
    /// order, so reaping drains the head. Other policies sweep the store;
    /// the bound keeps any single exclusive acquisition short.
    pub fn reap_expired(&mut self, max: usize) -> usize {
        let now = current_timestamp_ms();
        let mut removed = 0;

        if self.policy == EvictionPolicy::Ttl {
            while removed < max {
                let Some(candidate) = self.index.pick_victim() else {
                    break;
                };
                let expired = self
                    .store
                    .get(&candidate)
                    .is_some_and(|entry| entry.is_expired_at(now));
                if !expired {
                    break;
                }
                self.remove_entry(&candidate, Departure::Expired);
                removed += 1;
            }
        } else {
            let batch: Vec<String> = self
                .store
                .iter()
                .filter(|(_, entry)| entry.is_expired_at(now))
                .map(|(key, _)| key.clone())
                .take(max)
                .collect();
            for key in &batch {
                self.remove_entry(key, Departure::Expired);
            }
            removed = batch.len();
        }
        removed
    }

    // == Shutdown ==
    /// Stops accepting public operations. In-flight calls complete; the
    /// caller is responsible for stopping the reaper task.
    pub fn begin_shutdown(&mut self) {
        self.shutting_down = true;
    }

    // == Gauges ==
    /// Current number of entries.
    pub fn len(&self) -> usize {
        self.store.len()
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// Current byte total charged against the memory budget.
    pub fn current_bytes(&self) -> u64 {
        self.store.total_bytes()
    }

    // == Internals ==
    fn ensure_accepting(&self) -> Result<()> {
        if self.shutting_down {
            Err(CacheError::ShuttingDown)
        } else {
            Ok(())
        }
    }

    /// Sole primitive for entry departure: removes from store and index and
    /// charges the counter named by `departure`. Every removal path (delete,
    /// eviction, lazy expiry, reaping) funnels through here.
    fn remove_entry(&mut self, key: &str, departure: Departure) -> bool {
        if self.store.remove(key).is_none() {
            return false;
        }
        self.index.remove(key);
        match departure {
            Departure::Deleted => self.stats.record_delete(),
            Departure::Evicted => self.stats.record_eviction(),
            Departure::Expired => self.stats.record_expiration(),
        }
        true
    }

    /// Removes one entry chosen by the policy. An already-expired victim is
    /// booked as an expiration rather than an eviction.
    fn evict_one(&mut self, now: u64) -> Result<()> {
        let Some(victim) = self.index.pick_victim() else {
            return Err(CacheError::CapacityExceeded(
                "eviction could not free enough space".to_string(),
            ));
        };
        let expired = self
            .store
            .get(&victim)
            .is_some_and(|entry| entry.is_expired_at(now));
        let departure = if expired {
            Departure::Expired
        } else {
            Departure::Evicted
        };
        self.remove_entry(&victim, departure);
        Ok(())
    }
}

// == Key Validation ==
fn validate_key(key: &str) -> Result<()> {
    if key.is_empty() {
        return Err(CacheError::InvalidKey("key must not be empty".to_string()));
    }
    if key.len() > MAX_KEY_LENGTH {
        return Err(CacheError::InvalidKey(format!(
            "key exceeds maximum length of {MAX_KEY_LENGTH} bytes"
        )));
    }
    Ok(())
}

// == Glob Matching ==
/// Anchored glob match over the whole text: `*` matches any (possibly empty)
/// substring, `?` matches exactly one character. Iterative two-pointer scan
/// with backtracking to the last star.
fn glob_match(pattern: &str, text: &str) -> bool {
    let pattern: Vec<char> = pattern.chars().collect();
    let text: Vec<char> = text.chars().collect();
    let (mut p, mut t) = (0, 0);
    let mut star: Option<usize> = None;
    let mut mark = 0;

    while t < text.len() {
        if p < pattern.len() && (pattern[p] == '?' || pattern[p] == text[t]) {
            p += 1;
            t += 1;
        } else if p < pattern.len() && pattern[p] == '*' {
            star = Some(p);
            mark = t;
            p += 1;
        } else if let Some(s) = star {
            p = s + 1;
            mark += 1;
            t = mark;
        } else {
            return false;
        }
    }
    while p < pattern.len() && pattern[p] == '*' {
        p += 1;
    }
    p == pattern.len()
}
