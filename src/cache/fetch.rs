//! Fetch-with-cache
//!
//! Cache-aside lookups: return the cached payload for a key, or run a
//! caller-supplied producer, cache what it returns, and hand that back.
//!
//! Concurrent misses on the same key are joined. The first caller runs the
//! producer while later callers wait on a per-key lock; once it is released
//! they re-check the cache and only run their own producer if the first one
//! failed. Failures are never cached.

use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex, PoisonError};

use bytes::Bytes;
use tokio::sync::Mutex as AsyncMutex;
use tracing::debug;

use crate::cache::Cache;

// == In-Flight Table ==
/// Per-key locks for keys that currently have a producer running.
#[derive(Debug, Default)]
pub(crate) struct InFlight {
    locks: Mutex<HashMap<String, Arc<AsyncMutex<()>>>>,
}

impl InFlight {
    fn join<'a>(&'a self, key: &'a str) -> Flight<'a> {
        let lock = self
            .locks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(key.to_string())
            .or_default()
            .clone();
        Flight {
            table: self,
            key,
            lock,
        }
    }

    fn leave(&self, key: &str, lock: &Arc<AsyncMutex<()>>) {
        let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
        // One reference in the table plus ours: nobody else is waiting
        let idle = locks
            .get(key)
            .is_some_and(|current| Arc::ptr_eq(current, lock) && Arc::strong_count(lock) == 2);
        if idle {
            locks.remove(key);
        }
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.locks.lock().unwrap_or_else(PoisonError::into_inner).len()
    }
}

/// Membership in a key's in-flight group. Leaving happens on drop, so a
/// failed or cancelled fetch never leaves a stale lock behind.
struct Flight<'a> {
    table: &'a InFlight,
    key: &'a str,
    lock: Arc<AsyncMutex<()>>,
}

impl Drop for Flight<'_> {
    fn drop(&mut self) {
        self.table.leave(self.key, &self.lock);
    }
}

impl Cache {
    // == Fetch ==
    /// Returns the payload cached under `key`, or produces, caches and
    /// returns it.
    ///
    /// `producer` runs outside the store lock and at most once per call. Its
    /// error is returned unchanged and nothing is cached for it, so the next
    /// fetch of the same key runs a producer again.
    ///
    /// # Example
    /// ```ignore
    /// let body = cache
    ///     .fetch(&url, || async { client.fetch_bytes(&url).await })
    ///     .await?;
    /// ```
    pub async fn fetch<F, Fut, E>(&self, key: &str, producer: F) -> Result<Bytes, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Bytes, E>>,
    {
        if let Some(payload) = self.get(key).await {
            return Ok(payload);
        }

        let flight = self.inner().in_flight.join(key);
        let _turn = flight.lock.lock().await;

        // Someone ahead of us in the group may have filled it already
        if let Some(payload) = self.peek(key).await {
            debug!(%key, "joined in-flight fetch");
            return Ok(payload);
        }

        debug!(%key, "cache miss, running producer");
        let payload = producer().await?;
        self.add(key, payload.clone()).await;
        Ok(payload)
    }
}
