//! LFU Frequency Ranking Module
//!
//! Ranks entries by access count with ties falling to the oldest access.
//! An ordered set of `(count, seq, key)` triples paired with a key map gives
//! O(log n) insert, touch and remove; the victim is the first element.
//!
//! `seq` is a monotonic stamp assigned on every insert and touch, so within
//! one frequency class the entry that was accessed longest ago ranks first,
//! even when wall-clock timestamps collide at millisecond granularity.

use std::collections::{BTreeSet, HashMap};

// == LFU Index ==
/// Frequency-ordered eviction ranking.
#[derive(Debug, Default)]
pub struct LfuIndex {
    ranks: BTreeSet<(u64, u64, String)>,
    keys: HashMap<String, (u64, u64)>,
    seq: u64,
}

impl LfuIndex {
    // == Constructor ==
    pub fn new() -> Self {
        Self::default()
    }

    // == Insert ==
    /// Registers a key with its current access count.
    pub fn insert(&mut self, key: &str, access_count: u64) {
        self.remove(key);
        self.seq += 1;
        self.ranks.insert((access_count, self.seq, key.to_string()));
        self.keys.insert(key.to_string(), (access_count, self.seq));
    }

    // == Touch ==
    /// Re-ranks a key after its access count changed.
    pub fn touch(&mut self, key: &str, access_count: u64) {
        self.insert(key, access_count);
    }

    // == Remove ==
    /// Deregisters a key. Unknown keys are ignored.
    pub fn remove(&mut self, key: &str) {
        if let Some((count, seq)) = self.keys.remove(key) {
            self.ranks.remove(&(count, seq, key.to_string()));
        }
    }

    // == Pick Victim ==
    /// Returns the least frequently used key without removing it.
    pub fn pick_victim(&self) -> Option<&str> {
        self.ranks.first().map(|(_, _, key)| key.as_str())
    }

    // == Length ==
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}
