//! # Fragcache Infrastructure
//!
//! Implementations of the storage ports defined in `fragcache-core`.
//!
//! This crate contains:
//! - The in-process bounded adapter (weighted LRU with TTL)
//! - The remote adapter that encodes entries for byte stores
//! - A moka-backed byte store
//! - Settings loading and tracing setup
//!
//! ## Architecture
//! - Implements traits defined in `fragcache-core`
//! - Depends on `fragcache-domain`, `fragcache-common` and `fragcache-core`
//! - Contains all "impure" code (env, files, global subscribers)

pub mod adapters;
pub mod backends;
pub mod config;
pub mod factory;
pub mod observability;

// Re-export commonly used items
pub use adapters::{InProcessBounded, RemoteAsync};
pub use backends::MokaBackend;
pub use factory::{
    fragment_store, in_process_store, in_process_store_with_clock, remote_store, InProcessStore,
    RemoteStore,
};
