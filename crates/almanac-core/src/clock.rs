//! The "current instant" capability.
//!
//! Business-day queries that depend on today take a [`Clock`] rather than
//! reading the system time themselves.

use std::sync::atomic::{AtomicI64, Ordering};

/// Source of the current absolute time.
pub trait Clock: Send + Sync {
    /// Seconds since the Unix epoch.
    fn now(&self) -> i64;
}

/// Reads the system clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> i64 {
        chrono::Utc::now().timestamp()
    }
}

/// A clock that reports a settable instant.
#[derive(Debug, Default)]
pub struct FixedClock {
    instant: AtomicI64,
}

impl FixedClock {
    /// Creates a clock frozen at `instant`.
    pub fn new(instant: i64) -> Self {
        Self {
            instant: AtomicI64::new(instant),
        }
    }

    /// Moves the clock to `instant`.
    pub fn set(&self, instant: i64) {
        self.instant.store(instant, Ordering::Relaxed);
    }

    /// Moves the clock forward by `seconds`.
    pub fn advance(&self, seconds: i64) {
        self.instant.fetch_add(seconds, Ordering::Relaxed);
    }
}

impl Clock for FixedClock {
    fn now(&self) -> i64 {
        self.instant.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_clock() {
        let clock = FixedClock::new(100);
        assert_eq!(clock.now(), 100);
        clock.advance(86_400);
        assert_eq!(clock.now(), 86_500);
        clock.set(0);
        assert_eq!(clock.now(), 0);
    }

    #[test]
    fn test_system_clock_is_after_2020() {
        assert!(SystemClock.now() > 1_577_836_800);
    }
}
