//! Bounded cache configuration and builder
//!
//! Capacity is expressed as a total weight rather than an entry count. Each
//! entry's weight comes from a caller-supplied weigher over `(value, key)`;
//! the default weigher charges 1 per entry, which turns the budget back into
//! a plain entry limit.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

/// Function computing an entry's contribution to the weight budget
pub type Weigher<K, V> = Arc<dyn Fn(&V, &K) -> u64 + Send + Sync>;

/// Configuration for [`BoundedCache`](super::BoundedCache)
pub struct BoundedConfig<K, V> {
    /// Maximum aggregate weight (`None` = unbounded)
    pub max_weight: Option<u64>,

    /// Time-to-live measured from insertion (`None` = no expiration)
    pub ttl: Option<Duration>,

    weigher: Weigher<K, V>,
}

impl<K: 'static, V: 'static> BoundedConfig<K, V> {
    /// Create a new configuration builder
    pub fn builder() -> BoundedConfigBuilder<K, V> {
        BoundedConfigBuilder::default()
    }

    /// Entry-count LRU: every entry weighs 1
    ///
    /// # Example
    /// ```
    /// use fragcache_common::cache::BoundedConfig;
    ///
    /// let config: BoundedConfig<String, i32> = BoundedConfig::lru(1000);
    /// assert_eq!(config.max_weight, Some(1000));
    /// ```
    pub fn lru(max_entries: u64) -> Self {
        Self::builder().max_weight(max_entries).build()
    }

    /// Entry-count LRU with expiry
    pub fn ttl_lru(ttl: Duration, max_entries: u64) -> Self {
        Self::builder().max_weight(max_entries).ttl(ttl).build()
    }

    /// Weight-bounded LRU
    ///
    /// # Example
    /// ```
    /// use fragcache_common::cache::BoundedConfig;
    ///
    /// let config: BoundedConfig<String, String> =
    ///     BoundedConfig::weighted(1024, |value: &String, _key: &String| value.len() as u64);
    /// assert_eq!(config.weigh(&"hello".to_string(), &"k".to_string()), 5);
    /// ```
    pub fn weighted<F>(max_weight: u64, weigher: F) -> Self
    where
        F: Fn(&V, &K) -> u64 + Send + Sync + 'static,
    {
        Self::builder().max_weight(max_weight).weigher(weigher).build()
    }

    /// Weight of a single entry
    pub fn weigh(&self, value: &V, key: &K) -> u64 {
        (self.weigher)(value, key)
    }
}

impl<K: 'static, V: 'static> Default for BoundedConfig<K, V> {
    fn default() -> Self {
        Self { max_weight: None, ttl: None, weigher: Arc::new(|_: &V, _: &K| 1_u64) }
    }
}

impl<K, V> Clone for BoundedConfig<K, V> {
    fn clone(&self) -> Self {
        Self { max_weight: self.max_weight, ttl: self.ttl, weigher: Arc::clone(&self.weigher) }
    }
}

impl<K, V> fmt::Debug for BoundedConfig<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BoundedConfig")
            .field("max_weight", &self.max_weight)
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}

/// Builder for [`BoundedConfig`] with fluent API
pub struct BoundedConfigBuilder<K, V> {
    config: BoundedConfig<K, V>,
}

impl<K: 'static, V: 'static> Default for BoundedConfigBuilder<K, V> {
    fn default() -> Self {
        Self { config: BoundedConfig::default() }
    }
}

impl<K: 'static, V: 'static> BoundedConfigBuilder<K, V> {
    /// Create a new builder with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the maximum aggregate weight
    pub fn max_weight(mut self, max_weight: u64) -> Self {
        self.config.max_weight = Some(max_weight);
        self
    }

    /// Set time-to-live for entries
    pub fn ttl(mut self, duration: Duration) -> Self {
        self.config.ttl = Some(duration);
        self
    }

    /// Set the weight function
    pub fn weigher<F>(mut self, weigher: F) -> Self
    where
        F: Fn(&V, &K) -> u64 + Send + Sync + 'static,
    {
        self.config.weigher = Arc::new(weigher);
        self
    }

    /// Use an already shared weight function
    pub fn shared_weigher(mut self, weigher: Weigher<K, V>) -> Self {
        self.config.weigher = weigher;
        self
    }

    /// Build the configuration
    pub fn build(self) -> BoundedConfig<K, V> {
        self.config
    }
}
