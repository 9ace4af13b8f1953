//! Runtime building blocks shared across fragcache crates.
//!
//! - [`cache`]: weight-bounded LRU cache with lazy TTL expiry
//! - [`time`]: clock abstraction so expiry can be tested without sleeping

#![forbid(unsafe_code)]
#![warn(rust_2018_idioms)]
#![warn(clippy::all, clippy::perf, clippy::complexity, clippy::suspicious)]

pub mod cache;
pub mod time;

pub use cache::{BoundedCache, BoundedConfig, CacheStats};
pub use time::{Clock, MockClock, SystemClock};
