//! Weight-bounded cache with LRU eviction and TTL expiration
//!
//! # Features
//!
//! - **Thread-safe**: a single `parking_lot::Mutex` guards recency order and
//!   the running weight together
//! - **Weighted**: capacity is a total weight; a pluggable weigher prices
//!   each entry from its value and key
//! - **TTL support**: entries expire a fixed duration after insertion
//! - **Metrics tracking**: hit/miss/eviction/expiration counters
//! - **Testable**: clock abstraction for deterministic time-based testing
//!
//! # Examples
//!
//! ## Simple LRU Cache
//! ```
//! use fragcache_common::cache::{BoundedCache, BoundedConfig};
//!
//! let cache: BoundedCache<String, i32> = BoundedCache::new(BoundedConfig::lru(100));
//! cache.insert("key".to_string(), 42);
//! assert_eq!(cache.get(&"key".to_string()), Some(42));
//! ```
//!
//! ## Weighted with TTL
//! ```
//! use std::time::Duration;
//!
//! use fragcache_common::cache::{BoundedCache, BoundedConfig};
//!
//! let config = BoundedConfig::builder()
//!     .max_weight(1024)
//!     .ttl(Duration::from_secs(300))
//!     .weigher(|value: &Vec<u8>, _key: &String| value.len() as u64)
//!     .build();
//!
//! let cache = BoundedCache::new(config);
//! cache.insert("blob".to_string(), vec![0_u8; 512]);
//! assert_eq!(cache.weight(), 512);
//! ```
//!
//! ## Cache Statistics
//! ```
//! use fragcache_common::cache::{BoundedCache, BoundedConfig};
//!
//! let cache: BoundedCache<String, i32> = BoundedCache::new(BoundedConfig::lru(100));
//!
//! cache.insert("key1".to_string(), 1);
//! let _ = cache.get(&"key1".to_string());
//!
//! let stats = cache.stats();
//! println!("Hit rate: {:.2}%", stats.hit_rate() * 100.0);
//! println!("Cache weight: {}/{:?}", stats.weight, stats.max_weight);
//! ```

mod config;
mod core;
mod stats;

// Re-export public API
pub use core::BoundedCache;

pub use config::{BoundedConfig, BoundedConfigBuilder, Weigher};
pub use stats::CacheStats;
