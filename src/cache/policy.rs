//! Eviction Policy Module
//!
//! Names the victim-selection strategies the engine can run with. The policy
//! is chosen at engine construction and fixed for its lifetime.

use std::fmt;
use std::str::FromStr;

// == Eviction Policy ==
/// Ordering rule used to pick eviction victims.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum EvictionPolicy {
    /// Least recently used first
    #[default]
    Lru,
    /// Least frequently used first; ties to the oldest access
    Lfu,
    /// Soonest expiry first; entries without expiry go last
    Ttl,
    /// Largest entry first; ties to the oldest access
    Size,
}

impl EvictionPolicy {
    /// Lowercase name as used in configuration and the stats surface.
    pub fn as_str(&self) -> &'static str {
        match self {
            EvictionPolicy::Lru => "lru",
            EvictionPolicy::Lfu => "lfu",
            EvictionPolicy::Ttl => "ttl",
            EvictionPolicy::Size => "size",
        }
    }
}

impl fmt::Display for EvictionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EvictionPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "lru" => Ok(EvictionPolicy::Lru),
            "lfu" => Ok(EvictionPolicy::Lfu),
            "ttl" => Ok(EvictionPolicy::Ttl),
            "size" => Ok(EvictionPolicy::Size),
            other => Err(format!("unknown eviction policy: {other}")),
        }
    }
}
