//! Ready-made stores
//!
//! Glue between loaded settings, a validated `CacheConfig` and the adapters
//! in this crate.

use fragcache_common::time::{Clock, SystemClock};
use fragcache_core::{CacheConfig, CacheConfigBuilder, CacheStore, RemoteBackend};
use fragcache_domain::{fragment_weigher, CacheSettings, Fragment, Result};

use crate::adapters::{InProcessBounded, RemoteAsync};

/// Store over the in-process bounded adapter
pub type InProcessStore<V, C = SystemClock> = CacheStore<V, InProcessBounded<V, C>>;

/// Store over an external byte backend
pub type RemoteStore<V, B> = CacheStore<V, RemoteAsync<B>>;

/// In-process store on the system clock
pub fn in_process_store<V>(config: &CacheConfig<V>) -> InProcessStore<V>
where
    V: Clone + Send + Sync + 'static,
{
    CacheStore::new(InProcessBounded::new(config), config.debug())
}

/// In-process store reading time from `clock`
pub fn in_process_store_with_clock<V, C>(config: &CacheConfig<V>, clock: C) -> InProcessStore<V, C>
where
    V: Clone + Send + Sync + 'static,
    C: Clock + 'static,
{
    CacheStore::new(InProcessBounded::with_clock(config, clock), config.debug())
}

/// Store that keeps entries in `backend` and trusts its eviction policy
pub fn remote_store<V, B>(backend: B, debug: bool) -> RemoteStore<V, B>
where
    V: serde::Serialize + serde::de::DeserializeOwned + Send + Sync + 'static,
    B: RemoteBackend,
{
    CacheStore::new(RemoteAsync::new(backend), debug)
}

/// Fragment cache configured from settings, weighing html plus key length
pub fn fragment_store(settings: &CacheSettings) -> Result<InProcessStore<Fragment>> {
    let config = CacheConfigBuilder::from_settings(settings).weigher(fragment_weigher).build()?;
    tracing::debug!(?config, "building fragment store");
    Ok(in_process_store(&config))
}
