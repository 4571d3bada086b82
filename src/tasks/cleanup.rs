//! Expiry Reaper Task
//!
//! Background task that periodically removes expired cache entries in
//! bounded batches, releasing the engine lock and yielding between batches
//! so foreground operations are not starved.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::{CacheEngine, REAP_BATCH_SIZE};

/// Spawns the background reaper.
///
/// Each tick, expired entries are reclaimed through the engine's reap path
/// in batches of at most [`REAP_BATCH_SIZE`]; the exclusive region is
/// acquired per batch and released before yielding, never across a whole
/// sweep.
///
/// # Arguments
/// * `cache` - Shared engine reference
/// * `cleanup_interval_secs` - Interval in seconds between reap runs
///
/// # Returns
/// A JoinHandle for the spawned task, used to stop the reaper during
/// graceful shutdown. Cancellation lands between batches, never inside one.
pub fn spawn_cleanup_task(
    cache: Arc<RwLock<CacheEngine>>,
    cleanup_interval_secs: u64,
) -> JoinHandle<()> {
    let interval = Duration::from_secs(cleanup_interval_secs);

    tokio::spawn(async move {
        info!(
            "Starting expiry reaper with interval of {} seconds",
            cleanup_interval_secs
        );

        loop {
            tokio::time::sleep(interval).await;

            let mut removed = 0;
            loop {
                let batch = {
                    let mut cache_guard = cache.write().await;
                    cache_guard.reap_expired(REAP_BATCH_SIZE)
                };
                removed += batch;

                // A short batch means the sweep is done
                if batch < REAP_BATCH_SIZE {
                    break;
                }
                tokio::task::yield_now().await;
            }

            if removed > 0 {
                info!("Expiry reaper removed {} expired entries", removed);
            } else {
                debug!("Expiry reaper found no expired entries");
            }
        }
    })
}
