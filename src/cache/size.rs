//! Size Ranking Module
//!
//! Ranks entries by estimated footprint, largest first, with ties falling to
//! the least recently accessed. Same ordered-set shape as the frequency
//! ranking: `(size descending, seq, key)` with a key map for exact removal.

use std::cmp::Reverse;
use std::collections::{BTreeSet, HashMap};

// == Size Index ==
/// Footprint-ordered eviction ranking.
#[derive(Debug, Default)]
pub struct SizeIndex {
    ranks: BTreeSet<(Reverse<u64>, u64, String)>,
    keys: HashMap<String, (u64, u64)>,
    seq: u64,
}

impl SizeIndex {
    // == Constructor ==
    pub fn new() -> Self {
        Self::default()
    }

    // == Insert ==
    /// Registers a key with its size estimate.
    pub fn insert(&mut self, key: &str, size_bytes: u64) {
        self.remove(key);
        self.seq += 1;
        self.ranks.insert((Reverse(size_bytes), self.seq, key.to_string()));
        self.keys.insert(key.to_string(), (size_bytes, self.seq));
    }

    // == Touch ==
    /// Re-stamps a key's access order; size-equal entries fall back to it.
    pub fn touch(&mut self, key: &str, size_bytes: u64) {
        self.insert(key, size_bytes);
    }

    // == Remove ==
    /// Deregisters a key. Unknown keys are ignored.
    pub fn remove(&mut self, key: &str) {
        if let Some((size, seq)) = self.keys.remove(key) {
            self.ranks.remove(&(Reverse(size), seq, key.to_string()));
        }
    }

    // == Pick Victim ==
    /// Returns the largest entry's key without removing it.
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
