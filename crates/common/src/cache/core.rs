//! Weight-bounded LRU cache with lazy TTL expiry
//!
//! Entries are ordered by recency; whenever the aggregate weight exceeds the
//! budget, least recently used entries are dropped until it fits again.
//! Expiry is checked lazily: an entry older than the TTL is removed when it
//! is next touched, independent of capacity pressure.

use std::hash::Hash;
use std::sync::Arc;
use std::time::Instant;

use lru::LruCache;
use parking_lot::Mutex;
use tracing::{debug, trace};

use super::config::BoundedConfig;
use super::stats::{CacheStats, MetricsCollector};
use crate::time::{Clock, SystemClock};

#[derive(Debug)]
struct Slot<V> {
    value: V,
    weight: u64,
    inserted_at: Instant,
}

struct Storage<K, V>
where
    K: Eq + Hash,
{
    entries: LruCache<K, Slot<V>>,
    /// Sum of the weights of every slot in `entries`
    weight: u64,
}

impl<K, V> Storage<K, V>
where
    K: Eq + Hash,
{
    fn new() -> Self {
        Self { entries: LruCache::unbounded(), weight: 0 }
    }

    fn take(&mut self, key: &K) -> Option<Slot<V>> {
        let slot = self.entries.pop(key)?;
        self.weight = self.weight.saturating_sub(slot.weight);
        Some(slot)
    }
}

/// Thread-safe, weight-bounded LRU cache
///
/// # Type Parameters
/// - `K`: Key type (must be `Eq + Hash`)
/// - `V`: Value type
/// - `C`: Clock type for expiry decisions (defaults to `SystemClock`)
///
/// # Example
/// ```
/// use fragcache_common::cache::{BoundedCache, BoundedConfig};
///
/// let config = BoundedConfig::weighted(10, |value: &String, _key: &u32| value.len() as u64);
/// let cache = BoundedCache::new(config);
///
/// cache.insert(1, "hello".to_string());
/// cache.insert(2, "world".to_string());
/// cache.insert(3, "!".to_string()); // pushes the weight to 11, evicting key 1
///
/// assert_eq!(cache.get(&1), None);
/// assert_eq!(cache.weight(), 6);
/// ```
pub struct BoundedCache<K, V, C = SystemClock>
where
    K: Eq + Hash,
{
    storage: Arc<Mutex<Storage<K, V>>>,
    config: BoundedConfig<K, V>,
    metrics: MetricsCollector,
    clock: C,
}

impl<K, V> BoundedCache<K, V, SystemClock>
where
    K: Eq + Hash + 'static,
    V: 'static,
{
    /// Create a new cache with the given configuration using system clock
    pub fn new(config: BoundedConfig<K, V>) -> Self {
        Self::with_clock(config, SystemClock)
    }
}

impl<K, V, C> BoundedCache<K, V, C>
where
    K: Eq + Hash + 'static,
    V: 'static,
    C: Clock,
{
    /// Create a new cache with a custom clock (useful for testing)
    pub fn with_clock(config: BoundedConfig<K, V>, clock: C) -> Self {
        Self {
            storage: Arc::new(Mutex::new(Storage::new())),
            config,
            metrics: MetricsCollector::new(),
            clock,
        }
    }

    /// Insert a value, making it the most recently used entry
    ///
    /// Returns `false` when the entry alone is heavier than the whole budget.
    /// Such an entry is not stored and any previous value under the same key
    /// is dropped.
    pub fn insert(&self, key: K, value: V) -> bool {
        let weight = self.config.weigh(&value, &key);
        let now = self.clock.now();

        let mut guard = self.storage.lock();
        let storage = &mut *guard;
        storage.take(&key);

        if self.config.max_weight.is_some_and(|max| weight > max) {
            self.metrics.record_rejection();
            debug!(weight, max_weight = ?self.config.max_weight, "entry exceeds cache budget");
            return false;
        }

        storage.entries.put(key, Slot { value, weight, inserted_at: now });
        storage.weight += weight;
        self.evict_overflow(storage);

        self.metrics.record_insert();
        true
    }

    /// Get a clone of a live value, refreshing its recency
    ///
    /// Returns `None` if the key doesn't exist or if the entry has expired.
    pub fn get(&self, key: &K) -> Option<V>
    where
        V: Clone,
    {
        self.get_with(key, |value| value.clone())
    }

    /// Run `f` against a live value in place, refreshing its recency
    ///
    /// The closure runs while the cache lock is held, so the read and the
    /// mutation are atomic with respect to other callers. The entry's weight
    /// is not recomputed.
    pub fn get_with<R, F>(&self, key: &K, f: F) -> Option<R>
    where
        F: FnOnce(&mut V) -> R,
    {
        let now = self.clock.now();
        let mut guard = self.storage.lock();
        let storage = &mut *guard;

        let expired = match storage.entries.peek(key) {
            Some(slot) => self.is_expired(slot, now),
            None => {
                self.metrics.record_miss();
                return None;
            }
        };

        if expired {
            storage.take(key);
            self.metrics.record_expiration();
            self.metrics.record_miss();
            trace!("expired entry removed on access");
            return None;
        }

        let slot = storage.entries.get_mut(key)?;
        self.metrics.record_hit();
        Some(f(&mut slot.value))
    }

    /// Whether a live entry exists, without touching its recency
    pub fn contains_key(&self, key: &K) -> bool {
        let now = self.clock.now();
        let guard = self.storage.lock();
        guard.entries.peek(key).is_some_and(|slot| !self.is_expired(slot, now))
    }

    /// Remove a value from the cache
    pub fn remove(&self, key: &K) -> Option<V> {
        self.storage.lock().take(key).map(|slot| slot.value)
    }

    /// Clear all entries and reset metrics
    pub fn clear(&self) {
        let mut storage = self.storage.lock();
        storage.entries.clear();
        storage.weight = 0;
        self.metrics.reset();
    }

    /// Current number of entries, including expired ones not yet touched
    pub fn len(&self) -> usize {
        self.storage.lock().entries.len()
    }

    /// Check if the cache is empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Current aggregate weight
    pub fn weight(&self) -> u64 {
        self.storage.lock().weight
    }

    /// Keys ordered from most to least recently used
    pub fn keys(&self) -> Vec<K>
    where
        K: Clone,
    {
        self.storage.lock().entries.iter().map(|(key, _)| key.clone()).collect()
    }

    /// Remove expired entries
    ///
    /// Returns the number of entries removed.
    pub fn cleanup_expired(&self) -> usize
    where
        K: Clone,
    {
        if self.config.ttl.is_none() {
            return 0;
        }

        let now = self.clock.now();
        let mut guard = self.storage.lock();
        let storage = &mut *guard;

        let expired: Vec<K> = storage
            .entries
            .iter()
            .filter(|(_, slot)| self.is_expired(slot, now))
            .map(|(key, _)| key.clone())
            .collect();

        for key in &expired {
            if storage.take(key).is_some() {
                self.metrics.record_expiration();
            }
        }

        expired.len()
    }

    /// Get cache statistics
    pub fn stats(&self) -> CacheStats {
        let (entries, weight) = {
            let storage = self.storage.lock();
            (storage.entries.len(), storage.weight)
        };
        self.metrics.snapshot(entries, weight, self.config.max_weight)
    }

    /// Configuration the cache was built with
    pub fn config(&self) -> &BoundedConfig<K, V> {
        &self.config
    }

    fn is_expired(&self, slot: &Slot<V>, now: Instant) -> bool {
        self.config
            .ttl
            .is_some_and(|ttl| now.saturating_duration_since(slot.inserted_at) >= ttl)
    }

    /// Drop least recently used entries until the budget is met
    fn evict_overflow(&self, storage: &mut Storage<K, V>) {
        let Some(max_weight) = self.config.max_weight else {
            return;
        };

        while storage.weight > max_weight {
            let Some((_, slot)) = storage.entries.pop_lru() else {
                break;
            };
            storage.weight = storage.weight.saturating_sub(slot.weight);
            self.metrics.record_eviction();
            trace!(weight = slot.weight, "evicted least recently used entry");
        }
    }
}

impl<K, V, C> Clone for BoundedCache<K, V, C>
where
    K: Eq + Hash,
    C: Clone,
{
    fn clone(&self) -> Self {
        Self {
            storage: Arc::clone(&self.storage),
            config: self.config.clone(),
            metrics: self.metrics.clone(),
            clock: self.clock.clone(),
        }
    }
}
