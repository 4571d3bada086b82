//! Background Tasks Module
//!
//! Contains background tasks that run periodically during server operation.
//!
//! # Tasks
//! - Expiry Reaper: Removes expired cache entries in bounded batches at
//!   configured intervals

mod cleanup;

pub use cleanup::spawn_cleanup_task;
