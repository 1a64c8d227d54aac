//! Reaper Task
//!
//! Background task that periodically evicts cache entries older than the
//! cache interval.

use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info};

use crate::cache::CacheStore;

/// Spawns a background task that sweeps the store once per `interval`.
///
/// Each sweep removes every entry inserted more than `interval` ago. Because
/// sweeps are themselves `interval` apart, an entry survives for at least
/// `interval` and at most `2 * interval` (plus lock wait).
///
/// The first sweep runs one full interval after the task starts. The task
/// runs until its `JoinHandle` is aborted.
///
/// # Arguments
/// * `store` - shared reference to the cache store
/// * `interval` - sweep period and maximum entry age
///
/// # Example
/// ```ignore
/// let store = Arc::new(RwLock::new(CacheStore::new()));
/// let reaper = spawn_reaper_task(store.clone(), Duration::from_secs(5));
/// // Later, during teardown:
/// reaper.abort();
/// ```
pub fn spawn_reaper_task(store: Arc<RwLock<CacheStore>>, interval: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        info!(?interval, "Starting cache reaper");

        let mut ticker = tokio::time::interval_at(tokio::time::Instant::now() + interval, interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;

            // Nothing can be older than the process clock allows
            let Some(cutoff) = Instant::now().checked_sub(interval) else {
                continue;
            };

            let removed = {
                let mut guard = store.write().await;
                guard.reap(cutoff)
            };

            if removed > 0 {
                info!("Cache reaper: removed {} expired entries", removed);
            } else {
                debug!("Cache reaper: no expired entries found");
            }
        }
    })
}
