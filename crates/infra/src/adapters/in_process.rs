//! In-process bounded adapter
//!
//! Entries live natively in a weighted LRU, so instrumentation mutates them
//! in place without any encoding. Capacity and age limits come from the
//! store's `CacheConfig`; the weight of an entry is computed once, when it
//! is written.

use async_trait::async_trait;
use fragcache_common::cache::{BoundedCache, BoundedConfig, CacheStats};
use fragcache_common::time::{Clock, SystemClock};
use fragcache_core::{CacheConfig, EntryUpdate, StoreAdapter};
use fragcache_domain::{CacheEntry, CompositeKey, Result};
use tracing::{debug, warn};

/// Synchronous, weight-bounded store with LRU eviction and lazy expiry
pub struct InProcessBounded<V, C = SystemClock> {
    cache: BoundedCache<CompositeKey, CacheEntry<V>, C>,
}

impl<V> InProcessBounded<V, SystemClock>
where
    V: Send + Sync + 'static,
{
    /// Create an adapter on the system clock
    pub fn new(config: &CacheConfig<V>) -> Self {
        Self::with_clock(config, SystemClock)
    }
}

impl<V, C> InProcessBounded<V, C>
where
    V: Send + Sync + 'static,
    C: Clock,
{
    /// Create an adapter reading time from `clock`
    pub fn with_clock(config: &CacheConfig<V>, clock: C) -> Self {
        let weigher = config.weigher();
        let bounded = BoundedConfig::builder()
            .max_weight(config.max_weight())
            .ttl(config.max_age())
            .weigher(move |entry: &CacheEntry<V>, key: &CompositeKey| {
                weigher(&entry.value, key.as_str())
            })
            .build();

        debug!(
            max_weight = config.max_weight(),
            max_age_ms = u64::try_from(config.max_age().as_millis()).unwrap_or(u64::MAX),
            "in-process cache created"
        );

        Self { cache: BoundedCache::with_clock(bounded, clock) }
    }

    /// Keys from most to least recently used, expired ones included until
    /// touched or pruned
    pub fn keys(&self) -> Vec<CompositeKey> {
        self.cache.keys()
    }

    /// Drop every expired entry now instead of on next access
    pub fn prune(&self) -> usize {
        let removed = self.cache.cleanup_expired();
        if removed > 0 {
            debug!(removed, "pruned expired cache entries");
        }
        removed
    }

    /// Drop every entry
    pub fn clear(&self) {
        self.cache.clear();
    }

    /// Snapshot of occupancy and counters
    pub fn stats(&self) -> CacheStats {
        self.cache.stats()
    }
}

#[async_trait]
impl<V, C> StoreAdapter<V> for InProcessBounded<V, C>
where
    V: Clone + Send + Sync + 'static,
    C: Clock + 'static,
{
    async fn set(&self, key: CompositeKey, entry: CacheEntry<V>) -> Result<()> {
        if !self.cache.insert(key.clone(), entry) {
            warn!(key = %key, "entry heavier than the whole cache budget, not stored");
        }
        Ok(())
    }

    async fn get(&self, key: &CompositeKey) -> Result<Option<CacheEntry<V>>> {
        Ok(self.cache.get(key))
    }

    async fn update(
        &self,
        key: &CompositeKey,
        apply: &EntryUpdate<V>,
    ) -> Result<Option<CacheEntry<V>>> {
        Ok(self.cache.get_with(key, |entry| {
            apply(entry);
            entry.clone()
        }))
    }

    async fn size(&self) -> Result<u64> {
        Ok(self.cache.weight())
    }

    fn name(&self) -> &str {
        "in-process"
    }
}
