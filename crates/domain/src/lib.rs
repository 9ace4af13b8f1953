//! # Fragcache Domain
//!
//! Data types shared by every fragcache crate.
//!
//! This crate contains:
//! - The crate-spanning error type and `Result` alias
//! - Cache key, entry envelope, and lookup result types
//! - Serialisable cache settings and their defaults
//!
//! ## Architecture
//! - No dependencies on other fragcache crates
//! - Only external dependencies allowed
//! - Pure data structures, no I/O

pub mod config;
pub mod constants;
pub mod errors;
pub mod types;

// Re-export commonly used items
pub use config::*;
pub use errors::*;
pub use types::*;
