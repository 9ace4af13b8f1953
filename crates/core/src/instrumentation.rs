//! Debug hit counting
//!
//! When enabled, every new entry carries a counter starting at zero and each
//! successful read bumps it by one before the caller sees the entry.

use fragcache_domain::CacheEntry;

/// Debug-only read counter applied to cache entries
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HitCounter {
    enabled: bool,
}

impl HitCounter {
    /// Counter that is active only when `enabled`
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    /// Whether reads are counted
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Wrap a freshly computed value, resetting its counter when enabled
    pub fn fresh<V>(&self, value: V) -> CacheEntry<V> {
        if self.enabled {
            CacheEntry::instrumented(value)
        } else {
            CacheEntry::new(value)
        }
    }

    /// Count one successful read of `entry`
    ///
    /// An entry written while instrumentation was off starts counting from
    /// zero.
    pub fn record<V>(&self, entry: &mut CacheEntry<V>) {
        if self.enabled {
            entry.hits = Some(entry.hits.unwrap_or(0).saturating_add(1));
        }
    }
}
