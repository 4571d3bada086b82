//! Request and Response models for the cache server API
//!
//! This module defines the DTOs (Data Transfer Objects) used for
//! serializing/deserializing HTTP request and response bodies and query
//! parameters.

pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use requests::{BatchGetRequest, BatchSetRequest, ClearParams, KeysParams, SetParams};
pub use responses::{
    BatchGetResponse, BatchSetResponse, ClearResponse, ErrorResponse, HealthResponse, KeysResponse,
};
