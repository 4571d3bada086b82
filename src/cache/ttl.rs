//! TTL Expiry Ranking Module
//!
//! Min-heap keyed by expiry timestamp with lazy invalidation: stale heap
//! nodes (removed or re-inserted keys) are skipped against a live-slot map
//! when the head is read. Entries without an expiry are held in an
//! insertion-ordered reserve and only become eligible once every
//! TTL-bearing entry is gone.

use std::cmp::Reverse;
use std::collections::{BTreeSet, BinaryHeap, HashMap};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Slot {
    Ttl { expires_at: u64, seq: u64 },
    Reserve { seq: u64 },
}

// == TTL Index ==
/// Expiry-ordered eviction ranking.
#[derive(Debug, Default)]
pub struct TtlIndex {
    heap: BinaryHeap<Reverse<(u64, u64, String)>>,
    slots: HashMap<String, Slot>,
    reserve: BTreeSet<(u64, String)>,
    seq: u64,
}

impl TtlIndex {
    // == Constructor ==
    pub fn new() -> Self {
        Self::default()
    }

    // == Insert ==
    /// Registers a key under its expiry timestamp, or in the no-expiry
    /// reserve when it has none.
    pub fn insert(&mut self, key: &str, expires_at: Option<u64>) {
        self.remove(key);
        self.seq += 1;
        match expires_at {
            Some(expires) => {
                self.heap.push(Reverse((expires, self.seq, key.to_string())));
                self.slots.insert(
                    key.to_string(),
                    Slot::Ttl {
                        expires_at: expires,
                        seq: self.seq,
                    },
                );
            }
            None => {
                self.reserve.insert((self.seq, key.to_string()));
                self.slots.insert(key.to_string(), Slot::Reserve { seq: self.seq });
            }
        }
    }

    // == Remove ==
    /// Deregisters a key. Its heap node, if any, is invalidated lazily.
    pub fn remove(&mut self, key: &str) {
        match self.slots.remove(key) {
            Some(Slot::Reserve { seq }) => {
                self.reserve.remove(&(seq, key.to_string()));
            }
            Some(Slot::Ttl { .. }) | None => {}
        }
    }

    // == Pick Victim ==
    /// Returns the key with the soonest expiry without removing it, falling
    /// back to the oldest reserve entry once the heap is drained.
    pub fn pick_victim(&mut self) -> Option<String> {
        while let Some(Reverse((expires, seq, key))) = self.heap.peek() {
            if self.is_current(key, *expires, *seq) {
                return Some(key.clone());
            }
            self.heap.pop();
        }
        self.reserve.first().map(|(_, key)| key.clone())
    }

    // == Length ==
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    fn is_current(&self, key: &str, expires_at: u64, seq: u64) -> bool {
        matches!(
            self.slots.get(key),
            Some(Slot::Ttl { expires_at: e, seq: s }) if *e == expires_at && *s == seq
        )
    }
}
