//! Request DTOs for the cache server API
//!
//! Defines the structure of incoming HTTP request bodies and query strings.

use std::collections::HashMap;

use serde::Deserialize;

/// Query parameters for the single-key SET operation (PUT /cache/{key})
#[derive(Debug, Clone, Deserialize)]
pub struct SetParams {
    /// Optional TTL in seconds
    pub ttl: Option<u64>,
}

/// Query parameters for the cache clear operation (DELETE /cache)
#[derive(Debug, Clone, Deserialize)]
pub struct ClearParams {
    /// Must be true for the clear to proceed
    pub confirm: Option<bool>,
}

/// Query parameters for the key listing (GET /admin/keys)
#[derive(Debug, Clone, Deserialize)]
pub struct KeysParams {
    /// Optional glob pattern (`*` any substring, `?` one character)
    pub pattern: Option<String>,
    /// Maximum number of keys to return
    pub limit: Option<usize>,
}

/// Request body for the batch GET operation (POST /cache/batch/get)
#[derive(Debug, Clone, Deserialize)]
pub struct BatchGetRequest {
    /// Keys to retrieve
    pub keys: Vec<String>,
}

/// Request body for the batch SET operation (POST /cache/batch/set)
///
/// The TTL, when present, applies uniformly to every item.
#[derive(Debug, Clone, Deserialize)]
pub struct BatchSetRequest {
    /// Key-value pairs to store
    pub items: HashMap<String, String>,
    /// Optional TTL in seconds for all items
    #[serde(default)]
    pub ttl: Option<u64>,
}
