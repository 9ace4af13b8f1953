//! Serialisable cache settings
//!
//! These are the knobs an embedding application loads from its environment
//! or a config file. They are turned into a validated, immutable
//! `CacheConfig` by `fragcache-core`.

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_MAX_AGE_JITTER_BASE_MS, DEFAULT_MAX_WEIGHT};

/// Cache settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheSettings {
    /// Weight budget of the in-process store
    pub max_weight: u64,

    /// Fixed time-to-live in milliseconds. When absent the TTL is drawn
    /// from the jitter window below.
    pub max_age_ms: Option<u64>,

    /// Base of the jitter window `[base, 2 * base)`
    pub max_age_jitter_base_ms: u64,

    /// Track hit counters on every entry
    pub debug: bool,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            max_weight: DEFAULT_MAX_WEIGHT,
            max_age_ms: None,
            max_age_jitter_base_ms: DEFAULT_MAX_AGE_JITTER_BASE_MS,
            debug: false,
        }
    }
}
