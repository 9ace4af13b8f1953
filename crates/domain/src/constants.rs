//! Domain-level constants
//!
//! Defaults here follow the long-standing behaviour of the fragment cache:
//! a 50 MiB weight budget and an expiry drawn from `[1h, 2h)`.

/// Separator between namespace and key in a composite key.
pub const KEY_SEPARATOR: char = '-';

/// Escape character used when a namespace or key contains a reserved char.
pub const KEY_ESCAPE: char = '\\';

/// Default weight budget for the in-process store (50 MiB of fragment text).
pub const DEFAULT_MAX_WEIGHT: u64 = 50 * 1024 * 1024;

/// Default base of the TTL jitter window (one hour).
pub const DEFAULT_MAX_AGE_JITTER_BASE_MS: u64 = 60 * 60 * 1000;

/// Overrides `max_weight`
pub const ENV_MAX_WEIGHT: &str = "FRAGCACHE_MAX_WEIGHT";
/// Fixed TTL in milliseconds
pub const ENV_MAX_AGE_MS: &str = "FRAGCACHE_MAX_AGE_MS";
/// Base of the TTL jitter window in milliseconds
pub const ENV_MAX_AGE_JITTER_BASE_MS: &str = "FRAGCACHE_MAX_AGE_JITTER_BASE_MS";
/// Enables hit counting
pub const ENV_DEBUG: &str = "FRAGCACHE_DEBUG";
