//! Cache key, entry, and lookup types

use std::fmt;

use serde::{Deserialize, Serialize};

/// A single cache slot identifier built from a namespace and a key.
///
/// Construct these through the key composer in `fragcache-core`; this type
/// only carries the already-escaped string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CompositeKey(String);

impl CompositeKey {
    /// Wrap an already composed key
    pub fn from_composed(composed: String) -> Self {
        Self(composed)
    }

    /// Borrow the composed key
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Length of the composed key in bytes
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the composed key is empty
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for CompositeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for CompositeKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<&str> for CompositeKey {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Envelope stored by every backend.
///
/// `hits` is present only when the store runs with debug instrumentation.
/// The same record is kept natively by in-process backends and encoded as a
/// whole by serialising ones, so the counter survives a round trip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheEntry<V> {
    pub value: V,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hits: Option<u64>,
}

impl<V> CacheEntry<V> {
    /// Entry without a hit counter
    pub fn new(value: V) -> Self {
        Self { value, hits: None }
    }

    /// Entry with a hit counter starting at zero
    pub fn instrumented(value: V) -> Self {
        Self { value, hits: Some(0) }
    }

    /// Consume the envelope and return the cached value
    pub fn into_value(self) -> V {
        self.value
    }
}

/// Result of reading a slot.
///
/// `NotFound` covers both "never written" and "expired or evicted".
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup<V> {
    /// Live entry, with the counter already updated when instrumented
    Hit(CacheEntry<V>),

    /// Absent or expired
    NotFound,
}

impl<V> Lookup<V> {
    /// Whether a live entry was found
    pub fn is_hit(&self) -> bool {
        matches!(self, Self::Hit(_))
    }

    /// Whether the slot was absent or expired
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound)
    }

    /// Borrow the entry on a hit
    pub fn entry(&self) -> Option<&CacheEntry<V>> {
        match self {
            Self::Hit(entry) => Some(entry),
            Self::NotFound => None,
        }
    }

    /// Borrow the cached value on a hit
    pub fn value(&self) -> Option<&V> {
        self.entry().map(|entry| &entry.value)
    }

    /// Hit counter of the entry, if found and instrumented
    pub fn hits(&self) -> Option<u64> {
        self.entry().and_then(|entry| entry.hits)
    }

    /// Take the entry on a hit
    pub fn into_entry(self) -> Option<CacheEntry<V>> {
        match self {
            Self::Hit(entry) => Some(entry),
            Self::NotFound => None,
        }
    }

    /// Take the cached value on a hit
    pub fn into_value(self) -> Option<V> {
        self.into_entry().map(CacheEntry::into_value)
    }
}

impl<V> From<Option<CacheEntry<V>>> for Lookup<V> {
    fn from(found: Option<CacheEntry<V>>) -> Self {
        found.map_or(Self::NotFound, Self::Hit)
    }
}

/// A rendered UI fragment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fragment {
    /// Rendered markup
    pub html: String,
}

impl Fragment {
    /// Wrap rendered markup
    pub fn new<S: Into<String>>(html: S) -> Self {
        Self { html: html.into() }
    }
}

/// Default weight of a fragment: rendered length plus key length.
pub fn fragment_weigher(fragment: &Fragment, key: &str) -> u64 {
    (fragment.html.len() + key.len()) as u64
}
