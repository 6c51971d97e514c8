//! Environment abstraction for deterministic testing.
//!
//! Reservations are stamped with wall-clock seconds. The core never reads the
//! system clock itself; it asks an [`Environment`], so tests can pin time with
//! [`ManualEnv`] and production uses [`SystemEnv`].

use std::{
    sync::{
        Arc,
        atomic::{AtomicI64, Ordering},
    },
    time::{SystemTime, UNIX_EPOCH},
};

/// Source of wall-clock time.
pub trait Environment: Clone + Send + Sync + 'static {
    /// Seconds since the Unix epoch.
    ///
    /// Not monotonic: the value follows the system clock, including
    /// adjustments.
    fn wall_clock_secs(&self) -> i64;
}

/// Production environment using the system clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemEnv;

impl SystemEnv {
    /// Create a new system environment.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Environment for SystemEnv {
    fn wall_clock_secs(&self) -> i64 {
        // A clock set before 1970 yields negative seconds rather than failing.
        match SystemTime::now().duration_since(UNIX_EPOCH) {
            Ok(elapsed) => i64::try_from(elapsed.as_secs()).unwrap_or(i64::MAX),
            Err(before) => -i64::try_from(before.duration().as_secs()).unwrap_or(i64::MAX),
        }
    }
}

/// Hand-driven clock.
///
/// Clones share the same time, so a test can keep one handle and advance the
/// clock seen by a [`crate::Runtime`] it has handed another.
#[derive(Debug, Clone, Default)]
pub struct ManualEnv {
    now: Arc<AtomicI64>,
}

impl ManualEnv {
    /// Clock starting at `secs`.
    pub fn new(secs: i64) -> Self {
        Self { now: Arc::new(AtomicI64::new(secs)) }
    }

    /// Jump to `secs`.
    pub fn set(&self, secs: i64) {
        self.now.store(secs, Ordering::SeqCst);
    }

    /// Move forward by `secs`.
    pub fn advance(&self, secs: i64) {
        self.now.fetch_add(secs, Ordering::SeqCst);
    }
}

impl Environment for ManualEnv {
    fn wall_clock_secs(&self) -> i64 {
        self.now.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn system_clock_is_after_2020() {
        assert!(SystemEnv::new().wall_clock_secs() > 1_577_836_800);
    }

    #[test]
    fn manual_clock_is_shared_between_clones() {
        let env = ManualEnv::new(100);
        let handle = env.clone();

        handle.advance(5);
        assert_eq!(env.wall_clock_secs(), 105);

        handle.set(-3);
        assert_eq!(env.wall_clock_secs(), -3);
    }
}
