//! API Handlers
//!
//! HTTP request handlers for each cache server endpoint. Values travel as
//! raw request/response bodies on the single-key routes; batch operations,
//! statistics and administration speak JSON.

use std::sync::Arc;
use tokio::sync::RwLock;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::cache::{CacheEngine, StatsSnapshot};
use crate::error::{CacheError, Result};
use crate::models::{
    BatchGetRequest, BatchGetResponse, BatchSetRequest, BatchSetResponse, ClearParams,
    ClearResponse, HealthResponse, KeysParams, KeysResponse, SetParams,
};

/// Application state shared across all handlers.
///
/// The engine sits behind one RwLock: the write guard is the exclusive
/// mutation region every operation (including reads, which bump recency
/// metadata) acquires.
#[derive(Clone)]
pub struct AppState {
    /// Thread-safe cache engine
    pub cache: Arc<RwLock<CacheEngine>>,
}

impl AppState {
    /// Creates a new AppState around the given engine.
    pub fn new(engine: CacheEngine) -> Self {
        Self {
            cache: Arc::new(RwLock::new(engine)),
        }
    }

    /// Creates a new AppState from configuration.
    pub fn from_config(config: &crate::config::Config) -> Self {
        let engine = CacheEngine::new(config.max_entries, config.max_bytes, config.policy)
            .with_default_ttl(config.default_ttl)
            .with_entry_overhead(config.entry_overhead_bytes);
        Self::new(engine)
    }
}

/// Handler for GET /cache/{key}
///
/// Returns the raw value body, or 404 when the key is absent or expired.
pub async fn get_handler(State(state): State<AppState>, Path(key): Path<String>) -> Result<String> {
    // Write lock: reads mutate recency and frequency metadata
    let mut cache = state.cache.write().await;
    cache.get(&key)
}

/// Handler for PUT /cache/{key}?ttl={seconds}
///
/// Stores the request body under the key; responds 204 on success.
pub async fn set_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
    Query(params): Query<SetParams>,
    body: String,
) -> Result<StatusCode> {
    let mut cache = state.cache.write().await;
    cache.set(&key, body, params.ttl)?;
    Ok(StatusCode::NO_CONTENT)
}

/// Handler for DELETE /cache/{key}
///
/// Responds 204 when an entry was removed, 404 otherwise.
pub async fn delete_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<StatusCode> {
    let mut cache = state.cache.write().await;
    if cache.delete(&key)? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(CacheError::NotFound(key))
    }
}

/// Handler for DELETE /cache?confirm=true
///
/// Clears the whole cache; refuses without explicit confirmation.
pub async fn clear_handler(
    State(state): State<AppState>,
    Query(params): Query<ClearParams>,
) -> Result<Json<ClearResponse>> {
    if params.confirm != Some(true) {
        return Err(CacheError::InvalidRequest(
            "must set confirm=true to clear the cache".to_string(),
        ));
    }

    let mut cache = state.cache.write().await;
    let cleared = cache.clear()?;
    Ok(Json(ClearResponse::new(cleared)))
}

/// Handler for POST /cache/batch/get
pub async fn batch_get_handler(
    State(state): State<AppState>,
    Json(req): Json<BatchGetRequest>,
) -> Result<Json<BatchGetResponse>> {
    let mut cache = state.cache.write().await;
    let values = cache.get_many(&req.keys)?;
    Ok(Json(BatchGetResponse::new(values)))
}

/// Handler for POST /cache/batch/set
pub async fn batch_set_handler(
    State(state): State<AppState>,
    Json(req): Json<BatchSetRequest>,
) -> Result<Json<BatchSetResponse>> {
    let mut cache = state.cache.write().await;
    let stored = cache.set_many(req.items, req.ttl)?;
    Ok(Json(BatchSetResponse::new(stored)))
}

/// Handler for GET /stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsSnapshot> {
    let cache = state.cache.read().await;
    Json(cache.stats())
}

/// Handler for GET /admin/keys?pattern=&limit=
pub async fn keys_handler(
    State(state): State<AppState>,
    Query(params): Query<KeysParams>,
) -> Result<Json<KeysResponse>> {
    let cache = state.cache.read().await;
    let keys = cache.keys(params.pattern.as_deref(), params.limit)?;
    Ok(Json(KeysResponse::new(keys)))
}

/// Handler for GET /health
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    let cache = state.cache.read().await;
    Json(HealthResponse::healthy(&cache.stats()))
}
