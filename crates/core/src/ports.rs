//! Port interfaces for cache storage
//!
//! These traits define the boundary between the cache orchestrator and the
//! storage that actually holds entries.

use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use fragcache_domain::{CacheEntry, CompositeKey, Result};

/// In-place mutation applied to a live entry by [`StoreAdapter::update`]
pub type EntryUpdate<V> = dyn for<'e> Fn(&'e mut CacheEntry<V>) + Send + Sync;

/// Uniform storage contract used by `CacheStore`.
///
/// Every method is async. In-process adapters complete without suspending;
/// remote adapters suspend on I/O. Callers never branch on which one they
/// hold.
#[async_trait]
pub trait StoreAdapter<V>: Send + Sync
where
    V: Send + Sync + 'static,
{
    /// Write an entry, replacing any previous one under the same key
    async fn set(&self, key: CompositeKey, entry: CacheEntry<V>) -> Result<()>;

    /// Read a live entry; expired or evicted entries read as `None`
    async fn get(&self, key: &CompositeKey) -> Result<Option<CacheEntry<V>>>;

    /// Read a live entry and apply `apply` to it as one step.
    ///
    /// The mutated entry is stored back and returned. No other reader or
    /// writer of the same key may interleave between the read and the
    /// write-back.
    async fn update(
        &self,
        key: &CompositeKey,
        apply: &EntryUpdate<V>,
    ) -> Result<Option<CacheEntry<V>>>;

    /// Current aggregate weight, in the unit of the adapter's weigher
    async fn size(&self) -> Result<u64>;

    /// Short adapter name for logs
    fn name(&self) -> &str;
}

#[async_trait]
impl<V, A> StoreAdapter<V> for Arc<A>
where
    V: Send + Sync + 'static,
    A: StoreAdapter<V> + ?Sized,
{
    async fn set(&self, key: CompositeKey, entry: CacheEntry<V>) -> Result<()> {
        (**self).set(key, entry).await
    }

    async fn get(&self, key: &CompositeKey) -> Result<Option<CacheEntry<V>>> {
        (**self).get(key).await
    }

    async fn update(
        &self,
        key: &CompositeKey,
        apply: &EntryUpdate<V>,
    ) -> Result<Option<CacheEntry<V>>> {
        (**self).update(key, apply).await
    }

    async fn size(&self) -> Result<u64> {
        (**self).size().await
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

/// Externally supplied byte store (Redis, memcached, an embedded engine).
///
/// The store owns eviction and expiry; callers trust its policy entirely.
#[async_trait]
pub trait RemoteBackend: Send + Sync {
    /// Stored payload, or `None` when absent, evicted or expired
    async fn get(&self, key: &str) -> Result<Option<Bytes>>;

    /// Store `value`, replacing any previous payload
    async fn set(&self, key: &str, value: Bytes) -> Result<()>;

    /// Aggregate size as reported by the store
    async fn size(&self) -> Result<u64>;

    /// Short backend name for logs and errors
    fn name(&self) -> &str;
}

#[async_trait]
impl<B> RemoteBackend for Arc<B>
where
    B: RemoteBackend + ?Sized,
{
    async fn get(&self, key: &str) -> Result<Option<Bytes>> {
        (**self).get(key).await
    }

    async fn set(&self, key: &str, value: Bytes) -> Result<()> {
        (**self).set(key, value).await
    }

    async fn size(&self) -> Result<u64> {
        (**self).size().await
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}
