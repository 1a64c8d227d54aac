//! Cache Handle Module
//!
//! The public cache: a cloneable handle over one shared store, plus the
//! reaper task that keeps it pruned.

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use bytes::Bytes;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::fetch::InFlight;
use crate::cache::{CacheStats, CacheStore, EntryInfo};
use crate::error::{Error, Result};
use crate::tasks::spawn_reaper_task;

// == Cache ==
/// Time-expiring response cache.
///
/// Clones share the same store and reaper. The reaper stops when `close` is
/// called on any clone, or when the last clone is dropped.
#[derive(Debug, Clone)]
pub struct Cache {
    inner: Arc<Inner>,
}

#[derive(Debug)]
pub(crate) struct Inner {
    store: Arc<RwLock<CacheStore>>,
    pub(crate) in_flight: InFlight,
    interval: Duration,
    reaper: Mutex<Option<JoinHandle<()>>>,
}

impl Cache {
    // == Constructor ==
    /// Creates an empty cache and starts its reaper.
    ///
    /// `interval` is both the sweep period and the age past which an entry is
    /// evicted, so entries live between `interval` and `2 * interval`.
    ///
    /// Must be called from within a tokio runtime.
    ///
    /// # Errors
    /// `Error::InvalidInterval` if `interval` is zero.
    pub fn new(interval: Duration) -> Result<Self> {
        if interval.is_zero() {
            return Err(Error::InvalidInterval);
        }

        let store = Arc::new(RwLock::new(CacheStore::new()));
        let reaper = spawn_reaper_task(store.clone(), interval);

        Ok(Self {
            inner: Arc::new(Inner {
                store,
                in_flight: InFlight::default(),
                interval,
                reaper: Mutex::new(Some(reaper)),
            }),
        })
    }

    // == Add ==
    /// Stores `payload` under `key`, resetting that key's age.
    pub async fn add(&self, key: impl Into<String>, payload: Bytes) {
        let key = key.into();
        debug!(%key, bytes = payload.len(), "cache add");
        self.inner.store.write().await.put(key, payload);
    }

    // == Get ==
    /// Returns the payload cached under `key`, if it has not been reaped.
    ///
    /// Does not refresh the entry's age.
    pub async fn get(&self, key: &str) -> Option<Bytes> {
        let payload = self.inner.store.write().await.get(key);
        debug!(%key, hit = payload.is_some(), "cache get");
        payload
    }

    pub(crate) async fn peek(&self, key: &str) -> Option<Bytes> {
        self.inner.store.read().await.peek(key)
    }

    // == Close ==
    /// Stops the reaper. Idempotent.
    ///
    /// Entries already cached stay readable; they are just no longer evicted.
    pub fn close(&self) {
        self.inner.stop_reaper();
    }

    /// Returns true once `close` has been called.
    pub fn is_closed(&self) -> bool {
        self.inner
            .reaper
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_none()
    }

    pub fn interval(&self) -> Duration {
        self.inner.interval
    }

    pub async fn stats(&self) -> CacheStats {
        self.inner.store.read().await.stats()
    }

    /// Lists cached keys with their age, oldest first.
    pub async fn entries(&self) -> Vec<EntryInfo> {
        self.inner.store.read().await.entries()
    }

    pub async fn len(&self) -> usize {
        self.inner.store.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.store.read().await.is_empty()
    }

    pub(crate) fn inner(&self) -> &Inner {
        &self.inner
    }
}

impl Inner {
    fn stop_reaper(&self) {
        let handle = self
            .reaper
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(handle) = handle {
            handle.abort();
            info!("Cache reaper stopped");
        }
    }
}

impl Drop for Inner {
    fn drop(&mut self) {
        self.stop_reaper();
    }
}
