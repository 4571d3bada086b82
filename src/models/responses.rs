//! Response DTOs for the cache server API
//!
//! Defines the structure of outgoing HTTP response bodies. Statistics are
//! served directly as the engine's snapshot type.

use std::collections::HashMap;

use serde::Serialize;

use crate::cache::StatsSnapshot;

/// Response body for the cache clear operation (DELETE /cache?confirm=true)
#[derive(Debug, Clone, Serialize)]
pub struct ClearResponse {
    /// Number of entries removed
    pub cleared: usize,
}

impl ClearResponse {
    pub fn new(cleared: usize) -> Self {
        Self { cleared }
    }
}

/// Response body for the batch GET operation (POST /cache/batch/get)
#[derive(Debug, Clone, Serialize)]
pub struct BatchGetResponse {
    /// Found key-value pairs; missing and expired keys are absent
    pub values: HashMap<String, String>,
    /// Number of keys found
    pub found: usize,
}

impl BatchGetResponse {
    pub fn new(values: HashMap<String, String>) -> Self {
        let found = values.len();
        Self { values, found }
    }
}

/// Response body for the batch SET operation (POST /cache/batch/set)
#[derive(Debug, Clone, Serialize)]
pub struct BatchSetResponse {
    /// Number of items successfully stored
    pub stored: usize,
}

impl BatchSetResponse {
    pub fn new(stored: usize) -> Self {
        Self { stored }
    }
}

/// Response body for the key listing (GET /admin/keys)
#[derive(Debug, Clone, Serialize)]
pub struct KeysResponse {
    /// Matching keys, truncated to the requested limit
    pub keys: Vec<String>,
    /// Number of keys returned
    pub count: usize,
}

impl KeysResponse {
    pub fn new(keys: Vec<String>) -> Self {
        let count = keys.len();
        Self { keys, count }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g. "healthy")
    pub status: String,
    /// Seconds since the engine started
    pub uptime_seconds: u64,
    /// Current number of entries
    pub cache_size: usize,
    /// Lifetime hit ratio
    pub hit_ratio: f64,
    /// Estimated memory footprint in MiB
    pub memory_usage_mb: f64,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a healthy response from a statistics snapshot.
    pub fn healthy(stats: &StatsSnapshot) -> Self {
        Self {
            status: "healthy".to_string(),
            uptime_seconds: stats.uptime_seconds,
            cache_size: stats.current_size,
            hit_ratio: stats.hit_ratio,
            memory_usage_mb: stats.memory_usage_mb,
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Error response body for all error conditions
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error message describing what went wrong
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot() -> StatsSnapshot {
        StatsSnapshot {
            hits: 80,
            misses: 20,
            sets: 100,
            deletes: 5,
            evictions: 3,
            expirations: 2,
            current_size: 92,
            current_bytes: 20_000,
            max_size: 1000,
            max_bytes: 1_000_000,
            hit_ratio: 0.8,
            memory_usage_mb: 0.019,
            uptime_seconds: 42,
            policy: "lru".to_string(),
        }
    }

    #[test]
    fn test_clear_response_serialize() {
        let json = serde_json::to_string(&ClearResponse::new(7)).unwrap();
        assert!(json.contains("\"cleared\":7"));
    }

    #[test]
    fn test_batch_get_response_counts_found() {
        let mut values = HashMap::new();
        values.insert("a".to_string(), "1".to_string());
        let resp = BatchGetResponse::new(values);
        assert_eq!(resp.found, 1);
    }

    #[test]
    fn test_keys_response_counts() {
        let resp = KeysResponse::new(vec!["a".to_string(), "b".to_string()]);
        assert_eq!(resp.count, 2);
    }

    #[test]
    fn test_health_response_serialize() {
        let resp = HealthResponse::healthy(&snapshot());
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("healthy"));
        assert!(json.contains("timestamp"));
        assert!(json.contains("\"cache_size\":92"));
    }

    #[test]
    fn test_error_response_serialize() {
        let resp = ErrorResponse::new("Something went wrong");
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("error"));
        assert!(json.contains("Something went wrong"));
    }
}
