//! Tracing setup for applications embedding the cache
//!
//! Library code only emits `tracing` events. Binaries and test harnesses
//! call [`init_tracing`] once to see them.

use tracing_subscriber::EnvFilter;

/// Install a global fmt subscriber filtered by `RUST_LOG`
///
/// `default_directive` applies when `RUST_LOG` is unset or invalid, e.g.
/// `"fragcache_infra=debug,info"`. Returns `false` if a global subscriber
/// was already installed, in which case nothing changes.
pub fn init_tracing(default_directive: &str) -> bool {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

    let installed =
        tracing_subscriber::fmt().with_env_filter(filter).with_target(true).try_init().is_ok();

    if installed {
        tracing::debug!(default_directive, "tracing initialized");
    }
    installed
}
