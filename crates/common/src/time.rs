//! Time abstraction for testability
//!
//! Expiry decisions read the current instant through [`Clock`] so tests can
//! move time forward without sleeping.
//!
//! # Examples
//!
//! ```
//! use std::time::Duration;
//!
//! use fragcache_common::time::{Clock, MockClock};
//!
//! let mock = MockClock::new();
//! let start = mock.now();
//! mock.advance(Duration::from_millis(100));
//! assert_eq!(mock.now().duration_since(start), Duration::from_millis(100));
//! ```

use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::Mutex;

/// Source of monotonic time
pub trait Clock: Send + Sync {
    /// Get current instant (monotonic time)
    fn now(&self) -> Instant;
}

/// Real system clock implementation
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

impl<T: Clock + ?Sized> Clock for Arc<T> {
    fn now(&self) -> Instant {
        (**self).now()
    }
}

/// Mock clock for deterministic testing
///
/// Clones share the same elapsed time, so a clock handed to a cache can be
/// advanced from the test body.
#[derive(Debug, Clone)]
pub struct MockClock {
    start: Instant,
    elapsed: Arc<Mutex<Duration>>,
}

impl MockClock {
    /// Create a new mock clock starting at the current instant
    pub fn new() -> Self {
        Self { start: Instant::now(), elapsed: Arc::new(Mutex::new(Duration::ZERO)) }
    }

    /// Advance the mock clock by a duration
    pub fn advance(&self, duration: Duration) {
        *self.elapsed.lock() += duration;
    }

    /// Advance the mock clock by milliseconds
    pub fn advance_millis(&self, millis: u64) {
        self.advance(Duration::from_millis(millis));
    }

    /// Set the mock clock to a specific elapsed time
    pub fn set_elapsed(&self, duration: Duration) {
        *self.elapsed.lock() = duration;
    }

    /// Get the current elapsed time
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        *self.elapsed.lock()
    }
}

impl Default for MockClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MockClock {
    fn now(&self) -> Instant {
        self.start + *self.elapsed.lock()
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for time.
    use super::*;

    /// Validates the system clock scenario.
    ///
    /// Assertions:
    /// - Ensures `now2 >= now1` evaluates to true.
    #[test]
    fn test_system_clock() {
        let clock = SystemClock;
        let now1 = clock.now();
        let now2 = clock.now();

        assert!(now2 >= now1);
    }

    /// Validates `MockClock::new` behavior for the mock clock advance scenario.
    ///
    /// Assertions:
    /// - Confirms `after.duration_since(start)` equals
    ///   `Duration::from_millis(150)`.
    #[test]
    fn test_mock_clock_advance() {
        let clock = MockClock::new();
        let start = clock.now();

        clock.advance(Duration::from_millis(100));
        clock.advance_millis(50);
        let after = clock.now();

        assert_eq!(after.duration_since(start), Duration::from_millis(150));
    }

    /// Validates `MockClock::new` behavior for the mock clock set elapsed
    /// scenario.
    ///
    /// Assertions:
    /// - Confirms `clock.elapsed()` equals `Duration::from_secs(10)`.
    /// - Confirms `clock.elapsed()` equals `Duration::from_secs(20)`.
    #[test]
    fn test_mock_clock_set_elapsed() {
        let clock = MockClock::new();

        clock.set_elapsed(Duration::from_secs(10));
        assert_eq!(clock.elapsed(), Duration::from_secs(10));

        clock.set_elapsed(Duration::from_secs(20));
        assert_eq!(clock.elapsed(), Duration::from_secs(20));
    }

    /// Validates `MockClock::new` behavior for the mock clock clone scenario.
    ///
    /// Assertions:
    /// - Confirms `clock2.elapsed()` equals `Duration::from_secs(10)`.
    /// - Confirms `clock2.elapsed()` equals `Duration::from_secs(15)`.
    #[test]
    fn test_mock_clock_clone() {
        let clock1 = MockClock::new();
        clock1.advance(Duration::from_secs(10));

        let clock2 = clock1.clone();
        assert_eq!(clock2.elapsed(), Duration::from_secs(10));

        // Cloned clocks share the same elapsed time
        clock1.advance(Duration::from_secs(5));
        assert_eq!(clock2.elapsed(), Duration::from_secs(15));
    }

    #[test]
    fn test_arc_clock_delegates() {
        let mock = MockClock::new();
        let shared: Arc<MockClock> = Arc::new(mock.clone());
        let start = shared.now();

        mock.advance(Duration::from_secs(1));
        assert_eq!(shared.now().duration_since(start), Duration::from_secs(1));
    }
}
