//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;

use crate::cache::EvictionPolicy;

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Maximum number of entries the cache can hold
    pub max_entries: usize,
    /// Maximum total bytes charged against the memory budget
    pub max_bytes: u64,
    /// Eviction policy used to pick victims at capacity
    pub policy: EvictionPolicy,
    /// Default TTL in seconds applied when a set omits one (None = no expiry)
    pub default_ttl: Option<u64>,
    /// Per-entry metadata overhead charged to the byte budget
    pub entry_overhead_bytes: usize,
    /// Background reaper interval in seconds
    pub cleanup_interval: u64,
    /// HTTP server port
    pub server_port: u16,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `MAX_ENTRIES` - Maximum cache entries (default: 10000)
    /// - `MAX_BYTES` - Memory budget in bytes (default: 536870912, i.e. 512 MiB)
    /// - `EVICTION_POLICY` - lru, lfu, ttl or size (default: lru)
    /// - `DEFAULT_TTL` - Default TTL in seconds (default: unset, entries never expire)
    /// - `ENTRY_OVERHEAD_BYTES` - Metadata charge per entry (default: 200)
    /// - `CLEANUP_INTERVAL` - Reaper frequency in seconds (default: 60)
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    pub fn from_env() -> Self {
        Self {
            max_entries: env::var("MAX_ENTRIES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(10_000),
            max_bytes: env::var("MAX_BYTES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(512 * 1024 * 1024),
            policy: env::var("EVICTION_POLICY")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or_default(),
            default_ttl: env::var("DEFAULT_TTL").ok().and_then(|v| v.parse().ok()),
            entry_overhead_bytes: env::var("ENTRY_OVERHEAD_BYTES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(200),
            cleanup_interval: env::var("CLEANUP_INTERVAL")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(60),
            server_port: env::var("SERVER_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3000),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_entries: 10_000,
            max_bytes: 512 * 1024 * 1024,
            policy: EvictionPolicy::Lru,
            default_ttl: None,
            entry_overhead_bytes: 200,
            cleanup_interval: 60,
            server_port: 3000,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.max_entries, 10_000);
        assert_eq!(config.max_bytes, 512 * 1024 * 1024);
        assert_eq!(config.policy, EvictionPolicy::Lru);
        assert_eq!(config.default_ttl, None);
        assert_eq!(config.entry_overhead_bytes, 200);
        assert_eq!(config.cleanup_interval, 60);
        assert_eq!(config.server_port, 3000);
    }

    #[test]
    fn test_config_from_env_defaults() {
        // Clear any existing env vars to test defaults
        env::remove_var("MAX_ENTRIES");
        env::remove_var("MAX_BYTES");
        env::remove_var("EVICTION_POLICY");
        env::remove_var("DEFAULT_TTL");
        env::remove_var("ENTRY_OVERHEAD_BYTES");
        env::remove_var("CLEANUP_INTERVAL");
        env::remove_var("SERVER_PORT");

        let config = Config::from_env();
        assert_eq!(config.max_entries, 10_000);
        assert_eq!(config.policy, EvictionPolicy::Lru);
        assert_eq!(config.default_ttl, None);
        assert_eq!(config.cleanup_interval, 60);
    }
}
