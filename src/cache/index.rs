//! Eviction Index Module
//!
//! Policy dispatch over the four ranking structures. The variant is chosen
//! once at engine construction; every mutation of the store is mirrored here
//! through `insert` / `remove` / `touch`, and the engine asks `pick_victim`
//! for the next candidate when capacity is breached.

use crate::cache::entry::EntryMeta;
use crate::cache::lfu::LfuIndex;
use crate::cache::lru::LruList;
use crate::cache::size::SizeIndex;
use crate::cache::ttl::TtlIndex;
use crate::cache::EvictionPolicy;

// == Eviction Index ==
/// Policy-specific ordering over the current entries.
#[derive(Debug)]
pub enum EvictionIndex {
    Lru(LruList),
    Lfu(LfuIndex),
    Ttl(TtlIndex),
    Size(SizeIndex),
}

impl EvictionIndex {
    // == Constructor ==
    /// Creates the empty ranking structure for the given policy.
    pub fn new(policy: EvictionPolicy) -> Self {
        match policy {
            EvictionPolicy::Lru => EvictionIndex::Lru(LruList::new()),
            EvictionPolicy::Lfu => EvictionIndex::Lfu(LfuIndex::new()),
            EvictionPolicy::Ttl => EvictionIndex::Ttl(TtlIndex::new()),
            EvictionPolicy::Size => EvictionIndex::Size(SizeIndex::new()),
        }
    }

    // == Insert ==
    /// Registers a new entry under its ordering-relevant metadata.
    pub fn insert(&mut self, key: &str, meta: EntryMeta) {
        match self {
            EvictionIndex::Lru(lru) => lru.insert(key),
            EvictionIndex::Lfu(lfu) => lfu.insert(key, meta.access_count),
            EvictionIndex::Ttl(ttl) => ttl.insert(key, meta.expires_at),
            EvictionIndex::Size(size) => size.insert(key, meta.size_bytes),
        }
    }

    // == Remove ==
    /// Deregisters an entry.
    pub fn remove(&mut self, key: &str) {
        match self {
            EvictionIndex::Lru(lru) => lru.remove(key),
            EvictionIndex::Lfu(lfu) => lfu.remove(key),
            EvictionIndex::Ttl(ttl) => ttl.remove(key),
            EvictionIndex::Size(size) => size.remove(key),
        }
    }

    // == Touch ==
    /// Notifies the ranking that ordering-relevant metadata changed after a
    /// successful read. Expiry order does not change on access, so the TTL
    /// ranking ignores touches.
    pub fn touch(&mut self, key: &str, meta: EntryMeta) {
        match self {
            EvictionIndex::Lru(lru) => lru.touch(key),
            EvictionIndex::Lfu(lfu) => lfu.touch(key, meta.access_count),
            EvictionIndex::Ttl(_) => {}
            EvictionIndex::Size(size) => size.touch(key, meta.size_bytes),
        }
    }

    // == Pick Victim ==
    /// Returns the next eviction candidate without removing it.
    pub fn pick_victim(&mut self) -> Option<String> {
        match self {
            EvictionIndex::Lru(lru) => lru.peek_oldest().map(str::to_string),
            EvictionIndex::Lfu(lfu) => lfu.pick_victim().map(str::to_string),
            EvictionIndex::Ttl(ttl) => ttl.pick_victim(),
            EvictionIndex::Size(size) => size.pick_victim().map(str::to_string),
        }
    }

    // == Length ==
    /// Number of indexed entries; always equals the store cardinality.
    pub fn len(&self) -> usize {
        match self {
            EvictionIndex::Lru(lru) => lru.len(),
            EvictionIndex::Lfu(lfu) => lfu.len(),
            EvictionIndex::Ttl(ttl) => ttl.len(),
            EvictionIndex::Size(size) => size.len(),
        }
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
