//! Validated cache construction config
//!
//! A [`CacheConfig`] is immutable once built. Building fails fast on values
//! that would make the cache useless instead of substituting defaults.
//!
//! The time-to-live is either fixed or drawn once, at build time, from a
//! jitter window `[base, 2 * base)`. Processes started together therefore
//! do not expire their caches in lockstep. The random source is injectable
//! so tests can pin the draw.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use fragcache_domain::constants::{DEFAULT_MAX_AGE_JITTER_BASE_MS, DEFAULT_MAX_WEIGHT};
use fragcache_domain::{fragment_weigher, CacheError, CacheSettings, Fragment, Result};
use rand::Rng;

/// Weight of a value stored under a composite key
pub type ValueWeigher<V> = Arc<dyn Fn(&V, &str) -> u64 + Send + Sync>;

/// Uniform TTL jitter over `[base, 2 * base)` milliseconds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TtlJitter {
    base_ms: u64,
}

impl TtlJitter {
    /// Window starting at `base_ms`
    pub fn from_millis(base_ms: u64) -> Self {
        Self { base_ms }
    }

    /// Exclusive upper bound of the window, `None` when it overflows
    pub fn upper_ms(&self) -> Option<u64> {
        self.base_ms.checked_mul(2)
    }

    /// Lower bound of the window
    pub fn base(&self) -> Duration {
        Duration::from_millis(self.base_ms)
    }

    /// Draw one TTL from the window
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Duration {
        if self.base_ms == 0 {
            return Duration::ZERO;
        }
        let last = self.base_ms.saturating_mul(2).saturating_sub(1).max(self.base_ms);
        Duration::from_millis(rng.gen_range(self.base_ms..=last))
    }
}

impl Default for TtlJitter {
    fn default() -> Self {
        Self::from_millis(DEFAULT_MAX_AGE_JITTER_BASE_MS)
    }
}

/// How the time-to-live is chosen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaxAge {
    /// Same TTL for every build
    Fixed(Duration),
    /// TTL drawn once per build
    Jitter(TtlJitter),
}

impl Default for MaxAge {
    fn default() -> Self {
        Self::Jitter(TtlJitter::default())
    }
}

/// Immutable cache configuration
pub struct CacheConfig<V> {
    max_weight: u64,
    weigher: ValueWeigher<V>,
    max_age: Duration,
    debug: bool,
}

impl<V: 'static> CacheConfig<V> {
    /// Create a new configuration builder
    pub fn builder() -> CacheConfigBuilder<V> {
        CacheConfigBuilder::default()
    }

    /// Build from loaded settings with the one-per-entry weigher
    pub fn from_settings(settings: &CacheSettings) -> Result<Self> {
        CacheConfigBuilder::from_settings(settings).build()
    }
}

impl CacheConfig<Fragment> {
    /// Builder preset charging each fragment its html plus key length
    pub fn fragments() -> CacheConfigBuilder<Fragment> {
        CacheConfig::builder().weigher(fragment_weigher)
    }
}

impl<V> CacheConfig<V> {
    /// Total weight the store may hold
    pub fn max_weight(&self) -> u64 {
        self.max_weight
    }

    /// Resolved time-to-live
    pub fn max_age(&self) -> Duration {
        self.max_age
    }

    /// Whether reads are counted
    pub fn debug(&self) -> bool {
        self.debug
    }

    /// Shared handle to the weigher
    pub fn weigher(&self) -> ValueWeigher<V> {
        Arc::clone(&self.weigher)
    }

    /// Weight of `value` stored under `key`
    pub fn weigh(&self, value: &V, key: &str) -> u64 {
        (self.weigher)(value, key)
    }
}

impl<V> Clone for CacheConfig<V> {
    fn clone(&self) -> Self {
        Self {
            max_weight: self.max_weight,
            weigher: Arc::clone(&self.weigher),
            max_age: self.max_age,
            debug: self.debug,
        }
    }
}

impl<V> fmt::Debug for CacheConfig<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CacheConfig")
            .field("max_weight", &self.max_weight)
            .field("max_age", &self.max_age)
            .field("debug", &self.debug)
            .finish_non_exhaustive()
    }
}

/// Builder for [`CacheConfig`] with fluent API
pub struct CacheConfigBuilder<V> {
    max_weight: u64,
    weigher: ValueWeigher<V>,
    max_age: MaxAge,
    debug: bool,
}

impl<V: 'static> Default for CacheConfigBuilder<V> {
    fn default() -> Self {
        Self {
            max_weight: DEFAULT_MAX_WEIGHT,
            weigher: Arc::new(|_: &V, _: &str| 1_u64),
            max_age: MaxAge::default(),
            debug: false,
        }
    }
}

impl<V: 'static> CacheConfigBuilder<V> {
    /// Builder with default limits and one-per-entry weights
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from loaded settings; the weigher can still be replaced
    pub fn from_settings(settings: &CacheSettings) -> Self {
        let max_age = match settings.max_age_ms {
            Some(ms) => MaxAge::Fixed(Duration::from_millis(ms)),
            None => MaxAge::Jitter(TtlJitter::from_millis(settings.max_age_jitter_base_ms)),
        };

        Self { max_weight: settings.max_weight, max_age, debug: settings.debug, ..Self::default() }
    }

    /// Total weight budget
    pub fn max_weight(mut self, max_weight: u64) -> Self {
        self.max_weight = max_weight;
        self
    }

    /// Replace the weight function
    pub fn weigher<F>(mut self, weigher: F) -> Self
    where
        F: Fn(&V, &str) -> u64 + Send + Sync + 'static,
    {
        self.weigher = Arc::new(weigher);
        self
    }

    /// Fixed time-to-live
    pub fn max_age(mut self, max_age: Duration) -> Self {
        self.max_age = MaxAge::Fixed(max_age);
        self
    }

    /// Time-to-live drawn from a jitter window at build time
    pub fn jitter(mut self, jitter: TtlJitter) -> Self {
        self.max_age = MaxAge::Jitter(jitter);
        self
    }

    /// Enable hit counting
    pub fn debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Validate and build, drawing any jitter from the thread RNG
    pub fn build(self) -> Result<CacheConfig<V>> {
        self.build_with_rng(&mut rand::thread_rng())
    }

    /// Validate and build, drawing any jitter from `rng`
    pub fn build_with_rng<R: Rng + ?Sized>(self, rng: &mut R) -> Result<CacheConfig<V>> {
        if self.max_weight == 0 {
            return Err(CacheError::config("max_weight", "must be greater than zero"));
        }

        let max_age = match self.max_age {
            MaxAge::Fixed(age) if age.is_zero() => {
                return Err(CacheError::config("max_age_ms", "must be greater than zero"));
            }
            MaxAge::Fixed(age) => age,
            MaxAge::Jitter(jitter) if jitter.base().is_zero() => {
                return Err(CacheError::config(
                    "max_age_jitter_base_ms",
                    "must be greater than zero",
                ));
            }
            MaxAge::Jitter(jitter) if jitter.upper_ms().is_none() => {
                return Err(CacheError::config(
                    "max_age_jitter_base_ms",
                    "window [base, 2 * base) overflows u64 milliseconds",
                ));
            }
            MaxAge::Jitter(jitter) => jitter.sample(rng),
        };

        Ok(CacheConfig {
            max_weight: self.max_weight,
            weigher: self.weigher,
            max_age,
            debug: self.debug,
        })
    }
}
