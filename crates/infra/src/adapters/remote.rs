//! Remote adapter
//!
//! Wraps a byte-level [`RemoteBackend`]. Entries travel as JSON-encoded
//! `CacheEntry` envelopes, so a hit counter written by one process is read
//! back intact by another. Eviction and expiry are left to the backend.
//!
//! Writes and the read-increment-write of an instrumented read run inside a
//! per-key critical section. Concurrent readers in this process therefore
//! never lose an increment, and a write cannot land between an update's read
//! and its write-back.

use async_trait::async_trait;
use bytes::Bytes;
use fragcache_core::{EntryUpdate, RemoteBackend, StoreAdapter};
use fragcache_domain::{CacheEntry, CompositeKey, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::trace;

use super::key_locks::KeyLocks;

/// Asynchronous adapter over an externally managed store
pub struct RemoteAsync<B> {
    backend: B,
    locks: KeyLocks,
}

impl<B: RemoteBackend> RemoteAsync<B> {
    /// Wrap `backend`, encoding entries as JSON envelopes
    pub fn new(backend: B) -> Self {
        Self { backend, locks: KeyLocks::new() }
    }

    /// Borrow the wrapped backend
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Keys with a critical section currently held or awaited
    pub fn locked_keys(&self) -> usize {
        self.locks.active()
    }
}

fn encode<V: Serialize>(entry: &CacheEntry<V>) -> Result<Bytes> {
    Ok(Bytes::from(serde_json::to_vec(entry)?))
}

fn decode<V: DeserializeOwned>(payload: &[u8]) -> Result<CacheEntry<V>> {
    Ok(serde_json::from_slice(payload)?)
}

#[async_trait]
impl<V, B> StoreAdapter<V> for RemoteAsync<B>
where
    V: Serialize + DeserializeOwned + Send + Sync + 'static,
    B: RemoteBackend,
{
    async fn set(&self, key: CompositeKey, entry: CacheEntry<V>) -> Result<()> {
        let payload = encode(&entry)?;
        let _section = self.locks.lock(key.as_str()).await;

        trace!(key = %key, bytes = payload.len(), backend = self.backend.name(), "writing entry");
        self.backend.set(key.as_str(), payload).await
    }

    async fn get(&self, key: &CompositeKey) -> Result<Option<CacheEntry<V>>> {
        match self.backend.get(key.as_str()).await? {
            Some(payload) => decode(&payload).map(Some),
            None => Ok(None),
        }
    }

    async fn update(
        &self,
        key: &CompositeKey,
        apply: &EntryUpdate<V>,
    ) -> Result<Option<CacheEntry<V>>> {
        let _section = self.locks.lock(key.as_str()).await;

        let Some(payload) = self.backend.get(key.as_str()).await? else {
            return Ok(None);
        };

        let mut entry: CacheEntry<V> = decode(&payload)?;
        apply(&mut entry);

        trace!(key = %key, hits = ?entry.hits, "writing back updated entry");
        self.backend.set(key.as_str(), encode(&entry)?).await?;

        Ok(Some(entry))
    }

    async fn size(&self) -> Result<u64> {
        self.backend.size().await
    }

    fn name(&self) -> &str {
        self.backend.name()
    }
}
