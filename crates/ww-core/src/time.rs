//! Clock abstraction driving the spin session
//!
//! The session never sleeps; hosts read a [`Clock`] and pass the reading
//! into `tick`. Real play uses [`MonotonicClock`], tests and the batch
//! simulator use [`ManualClock`] so no wall-clock time passes.

use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::Mutex;

/// Source of "time since origin" readings
pub trait Clock: Send + Sync {
    /// Time elapsed since the clock's origin
    fn now(&self) -> Duration;
}

/// Wall clock backed by [`Instant`]
#[derive(Debug, Clone, Copy)]
pub struct MonotonicClock {
    origin: Instant,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}

/// Virtual clock advanced explicitly
///
/// Clones share the same reading, so a test can hold one handle and
/// advance it while another is owned elsewhere.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Arc<Mutex<Duration>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Move the clock forward by `delta`
    pub fn advance(&self, delta: Duration) -> Duration {
        let mut now = self.now.lock();
        *now += delta;
        *now
    }

    /// Jump to `at`; readings never go backwards
    pub fn set(&self, at: Duration) -> Duration {
        let mut now = self.now.lock();
        if at > *now {
            *now = at;
        }
        *now
    }

    #[inline]
    pub fn advance_ms(&self, ms: u64) -> Duration {
        self.advance(Duration::from_millis(ms))
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        *self.now.lock()
    }
}
