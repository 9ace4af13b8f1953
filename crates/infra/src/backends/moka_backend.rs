//! Moka-backed byte store
//!
//! Stands in for an external cache server: it owns eviction (by byte
//! weight) and expiry, and the remote adapter trusts it entirely.

use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use fragcache_core::{CacheConfig, RemoteBackend};
use fragcache_domain::Result;
use moka::future::Cache as MokaCache;

/// [`RemoteBackend`] over an in-memory moka cache of encoded entries
pub struct MokaBackend {
    cache: MokaCache<String, Bytes>,
}

impl MokaBackend {
    /// Create a store bounded by `max_bytes` of key plus payload
    ///
    /// # Arguments
    ///
    /// * `max_bytes` - Maximum total weight in bytes
    /// * `ttl` - Optional time-to-live for all entries
    pub fn new(max_bytes: u64, ttl: Option<Duration>) -> Self {
        let mut builder = MokaCache::builder()
            .max_capacity(max_bytes)
            .weigher(|key: &String, value: &Bytes| {
                u32::try_from(key.len() + value.len()).unwrap_or(u32::MAX)
            });

        if let Some(ttl) = ttl {
            builder = builder.time_to_live(ttl);
        }

        Self { cache: builder.build() }
    }

    /// Age limit taken from a store config, bounded by `max_bytes`
    ///
    /// The config's `max_weight` is not reused: it is measured in weigher
    /// units, while moka weighs the encoded envelope bytes.
    pub fn from_config<V>(config: &CacheConfig<V>, max_bytes: u64) -> Self {
        Self::new(max_bytes, Some(config.max_age()))
    }
}

#[async_trait]
impl RemoteBackend for MokaBackend {
    async fn get(&self, key: &str) -> Result<Option<Bytes>> {
        Ok(self.cache.get(key).await)
    }

    async fn set(&self, key: &str, value: Bytes) -> Result<()> {
        self.cache.insert(key.to_owned(), value).await;
        Ok(())
    }

    async fn size(&self) -> Result<u64> {
        // Weighted size lags until pending maintenance has run
        self.cache.run_pending_tasks().await;
        Ok(self.cache.weighted_size())
    }

    fn name(&self) -> &str {
        "moka"
    }
}
