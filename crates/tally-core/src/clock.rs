//! Monotonic time sources for the stopwatch engine.
//!
//! Elapsed time is always derived from a wall-clock delta against an anchor
//! instant, never from counting ticks, so display cadence has no effect on
//! accuracy. The [`Clock`] trait is the seam that lets tests drive the
//! engine on a simulated timeline.

use std::cell::Cell;
use std::time::Instant;

/// A monotonic millisecond clock.
///
/// Implementations must be non-decreasing: successive calls to
/// [`Clock::now_ms`] never go backwards. The origin is arbitrary; only
/// deltas are meaningful.
pub trait Clock {
    /// Milliseconds elapsed since this clock's origin.
    fn now_ms(&self) -> u64;
}

/// Production clock backed by [`std::time::Instant`].
///
/// The origin is captured at construction, so `now_ms` starts near zero and
/// is immune to system wall-clock adjustments.
#[derive(Debug, Clone)]
pub struct MonotonicClock {
    origin: Instant,
}

impl MonotonicClock {
    /// Create a clock whose origin is the current instant.
    #[must_use]
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
    fn now_ms(&self) -> u64 {
        u64::try_from(self.origin.elapsed().as_millis()).unwrap_or(u64::MAX)
    }
}

/// Manually advanced clock for tests and simulations.
///
/// Time only moves when [`ManualClock::advance`] is called, which makes
/// scenarios like "run for exactly 1500 ms, lap, run 1000 ms more, pause"
/// fully deterministic.
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Cell<u64>,
}

impl ManualClock {
    /// Create a clock at time zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a clock at an arbitrary starting time.
    #[must_use]
    pub fn starting_at(ms: u64) -> Self {
        Self { now: Cell::new(ms) }
    }

    /// Move time forward by `ms` milliseconds.
    pub fn advance(&self, ms: u64) {
        self.now.set(self.now.get().saturating_add(ms));
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> u64 {
        self.now.get()
    }
}

/// Any shared reference to a clock is itself a clock. Lets an engine and its
/// test share one [`ManualClock`].
impl<C: Clock + ?Sized> Clock for &C {
    fn now_ms(&self) -> u64 {
        (**self).now_ms()
    }
}

impl<C: Clock + ?Sized> Clock for std::rc::Rc<C> {
    fn now_ms(&self) -> u64 {
        (**self).now_ms()
    }
}

impl<C: Clock + ?Sized> Clock for std::sync::Arc<C> {
    fn now_ms(&self) -> u64 {
        (**self).now_ms()
    }
}
