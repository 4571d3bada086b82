//! API Module
//!
//! HTTP handlers and routing for the cache server REST API.
//!
//! # Endpoints
//! - `GET /cache/:key` - Retrieve a value by key
//! - `PUT /cache/:key?ttl=` - Store a value with optional TTL
//! - `DELETE /cache/:key` - Delete a key
//! - `DELETE /cache?confirm=true` - Clear all entries
//! - `POST /cache/batch/get` - Batched retrieval
//! - `POST /cache/batch/set` - Batched storage
//! - `GET /stats` - Cache statistics
//! - `GET /admin/keys` - Key listing with glob filtering
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
