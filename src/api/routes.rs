//! API Routes
//!
//! Configures the Axum router with all cache server endpoints.

use axum::{
    routing::{delete, get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    batch_get_handler, batch_set_handler, clear_handler, delete_handler, get_handler,
    health_handler, keys_handler, set_handler, stats_handler, AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `GET /cache/:key` - Retrieve a value (raw body)
/// - `PUT /cache/:key?ttl=` - Store a value (raw body)
/// - `DELETE /cache/:key` - Delete a key
/// - `DELETE /cache?confirm=true` - Clear all entries
/// - `POST /cache/batch/get` - Batched retrieval
/// - `POST /cache/batch/set` - Batched storage
/// - `GET /stats` - Cache statistics
/// - `GET /admin/keys?pattern=&limit=` - Key listing
/// - `GET /health` - Health check endpoint
///
/// # Middleware
/// - CORS: Allows any origin (configurable for production)
/// - Tracing: Logs all requests for debugging
pub fn create_router(state: AppState) -> Router {
    // Configure CORS middleware
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Build router with all endpoints
    Router::new()
        .route(
            "/cache/:key",
            get(get_handler).put(set_handler).delete(delete_handler),
        )
        .route("/cache", delete(clear_handler))
        .route("/cache/batch/get", post(batch_get_handler))
        .route("/cache/batch/set", post(batch_set_handler))
        .route("/stats", get(stats_handler))
        .route("/admin/keys", get(keys_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
