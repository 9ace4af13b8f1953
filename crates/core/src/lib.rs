//! # Fragcache Core
//!
//! Cache orchestration without any storage code.
//!
//! This crate contains:
//! - Port interfaces (`StoreAdapter`, `RemoteBackend`)
//! - Composite key construction
//! - Debug hit-count instrumentation
//! - Validated construction config with TTL jitter
//! - The `CacheStore` orchestrator
//!
//! ## Architecture Principles
//! - Only depends on `fragcache-domain`
//! - No storage, network, or platform code
//! - All backends reached via traits

pub mod config;
pub mod instrumentation;
pub mod keys;
pub mod ports;
pub mod store;

pub use config::{CacheConfig, CacheConfigBuilder, MaxAge, TtlJitter, ValueWeigher};
pub use instrumentation::HitCounter;
pub use keys::KeyComposer;
pub use ports::{EntryUpdate, RemoteBackend, StoreAdapter};
pub use store::CacheStore;
