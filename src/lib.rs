//! CacheGrid - A single-node in-memory cache server
//!
//! Key-value caching over HTTP with dual capacity bounds (entry count and
//! byte budget), pluggable eviction policies and TTL expiry.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod tasks;

pub use api::AppState;
pub use config::Config;
pub use tasks::spawn_cleanup_task;
