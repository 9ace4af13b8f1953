//! Per-key async critical sections
//!
//! Each composite key gets its own `tokio` mutex on demand. A slot is
//! removed again by the last guard to leave it, so the map only holds keys
//! that are currently locked or awaited.

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::{Mutex, OwnedMutexGuard};

type Slot = Arc<Mutex<()>>;

#[derive(Debug, Default)]
pub(crate) struct KeyLocks {
    slots: DashMap<String, Slot>,
}

impl KeyLocks {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Wait for exclusive access to `key`
    pub(crate) async fn lock(&self, key: &str) -> KeyGuard<'_> {
        let slot = Arc::clone(&self.slots.entry(key.to_owned()).or_default());
        let guard = Arc::clone(&slot).lock_owned().await;

        KeyGuard { locks: self, key: key.to_owned(), slot, guard: Some(guard) }
    }

    /// Number of keys currently locked or awaited
    pub(crate) fn active(&self) -> usize {
        self.slots.len()
    }
}

pub(crate) struct KeyGuard<'a> {
    locks: &'a KeyLocks,
    key: String,
    slot: Slot,
    guard: Option<OwnedMutexGuard<()>>,
}

impl Drop for KeyGuard<'_> {
    fn drop(&mut self) {
        // Release first so the count below only sees the map and this guard.
        self.guard.take();

        // Waiters hold their own clones; a slot they hold is never removed,
        // and a locker arriving after removal simply creates a fresh one.
        let slot = &self.slot;
        self.locks.slots.remove_if(&self.key, |_, current| {
            Arc::ptr_eq(current, slot) && Arc::strong_count(current) <= 2
        });
    }
}
