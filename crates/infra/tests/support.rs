use std::collections::HashMap;
use std::io;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use fragcache_common::time::MockClock;
use fragcache_core::{CacheConfig, RemoteBackend};
use fragcache_domain::{CacheError, Result};
use fragcache_infra::{in_process_store_with_clock, InProcessStore};
use parking_lot::Mutex;

pub const MOCK_BACKEND: &str = "mock-remote";

/// In-memory byte store behaving like a networked cache.
///
/// Every call yields to the scheduler `latency` times before touching the
/// map, which lets concurrent tasks interleave the way real round trips do.
#[derive(Default)]
pub struct MockRemoteBackend {
    entries: Mutex<HashMap<String, Bytes>>,
    latency: usize,
    gets: AtomicUsize,
    sets: AtomicUsize,
    unreachable: AtomicBool,
}

impl MockRemoteBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Backend that yields `latency` times per call
    pub fn with_latency(latency: usize) -> Self {
        Self { latency, ..Self::default() }
    }

    /// Make every subsequent call fail like a refused connection
    pub fn set_unreachable(&self, unreachable: bool) {
        self.unreachable.store(unreachable, Ordering::SeqCst);
    }

    pub fn gets(&self) -> usize {
        self.gets.load(Ordering::SeqCst)
    }

    pub fn sets(&self) -> usize {
        self.sets.load(Ordering::SeqCst)
    }

    /// Stored bytes, bypassing the call counters
    pub fn raw(&self, key: &str) -> Option<Bytes> {
        self.entries.lock().get(key).cloned()
    }

    /// Overwrite stored bytes, bypassing the call counters
    pub fn put_raw(&self, key: &str, value: &'static [u8]) {
        self.entries.lock().insert(key.to_owned(), Bytes::from_static(value));
    }

    async fn round_trip(&self) -> Result<()> {
        for _ in 0..self.latency {
            tokio::task::yield_now().await;
        }
        if self.unreachable.load(Ordering::SeqCst) {
            return Err(CacheError::backend(
                MOCK_BACKEND,
                io::Error::new(io::ErrorKind::ConnectionRefused, "connection refused"),
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl RemoteBackend for MockRemoteBackend {
    async fn get(&self, key: &str) -> Result<Option<Bytes>> {
        self.gets.fetch_add(1, Ordering::SeqCst);
        self.round_trip().await?;
        Ok(self.raw(key))
    }

    async fn set(&self, key: &str, value: Bytes) -> Result<()> {
        self.sets.fetch_add(1, Ordering::SeqCst);
        self.round_trip().await?;
        self.entries.lock().insert(key.to_owned(), value);
        Ok(())
    }

    async fn size(&self) -> Result<u64> {
        self.round_trip().await?;
        Ok(self.entries.lock().values().map(|value| value.len() as u64).sum())
    }

    fn name(&self) -> &str {
        MOCK_BACKEND
    }
}

/// In-process string store weighing values by length, on a mock clock
pub fn string_store(
    max_weight: u64,
    max_age: Duration,
    debug: bool,
) -> (InProcessStore<String, MockClock>, MockClock) {
    let config = CacheConfig::builder()
        .max_weight(max_weight)
        .max_age(max_age)
        .weigher(|value: &String, _key: &str| value.len() as u64)
        .debug(debug)
        .build()
        .expect("test config should be valid");

    let clock = MockClock::new();
    (in_process_store_with_clock(&config, clock.clone()), clock)
}
