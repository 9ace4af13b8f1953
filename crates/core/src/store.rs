//! Cache orchestrator
//!
//! `CacheStore` is what the rendering pipeline talks to. It composes keys,
//! applies hit-count instrumentation and forwards everything else to its
//! adapter. It holds no per-entry state and never catches, retries or masks
//! adapter errors.

use std::marker::PhantomData;

use fragcache_domain::{CacheEntry, Lookup, Result};
use tracing::{debug, trace};

use crate::instrumentation::HitCounter;
use crate::keys::KeyComposer;
use crate::ports::StoreAdapter;

/// Namespaced memoization cache over a [`StoreAdapter`]
pub struct CacheStore<V, A> {
    adapter: A,
    keys: KeyComposer,
    hits: HitCounter,
    _value: PhantomData<fn() -> V>,
}

impl<V, A> CacheStore<V, A>
where
    V: Send + Sync + 'static,
    A: StoreAdapter<V>,
{
    /// Create a store that owns `adapter`
    pub fn new(adapter: A, debug: bool) -> Self {
        Self { adapter, keys: KeyComposer::new(), hits: HitCounter::new(debug), _value: PhantomData }
    }

    /// Cache `value` under `(namespace, key)`.
    ///
    /// With debug on the entry's hit counter starts at zero. The returned
    /// future resolves once the adapter has acknowledged the write.
    pub async fn new_entry(&self, namespace: &str, key: &str, value: V) -> Result<()> {
        let composite = self.keys.compose(namespace, key);
        trace!(key = %composite, adapter = self.adapter.name(), "storing cache entry");

        self.adapter.set(composite, self.hits.fresh(value)).await
    }

    /// Look up `(namespace, key)`.
    ///
    /// A live entry counts as one hit when debug is on, and the caller sees
    /// the updated counter. Absent or expired entries yield
    /// [`Lookup::NotFound`] and nothing is written.
    pub async fn get_entry(&self, namespace: &str, key: &str) -> Result<Lookup<V>> {
        let composite = self.keys.compose(namespace, key);

        let found = if self.hits.is_enabled() {
            let hits = self.hits;
            let record = move |entry: &mut CacheEntry<V>| hits.record(entry);
            self.adapter.update(&composite, &record).await?
        } else {
            self.adapter.get(&composite).await?
        };

        match &found {
            Some(entry) => debug!(key = %composite, hits = ?entry.hits, "cache hit"),
            None => trace!(key = %composite, "cache miss"),
        }

        Ok(Lookup::from(found))
    }

    /// Current aggregate weight reported by the adapter
    pub async fn size(&self) -> Result<u64> {
        self.adapter.size().await
    }

    /// Whether reads are counted
    pub fn is_debug(&self) -> bool {
        self.hits.is_enabled()
    }

    /// Borrow the adapter, e.g. for maintenance calls it offers
    pub fn adapter(&self) -> &A {
        &self.adapter
    }
}
