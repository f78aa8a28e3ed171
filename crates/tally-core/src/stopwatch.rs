//! Stopwatch state machine with an append-only lap ledger.
//!
//! The engine is a three-state machine (`Stopped` → `Running` ⇄ `Paused`)
//! whose elapsed time is recomputed from a clock delta on every read. All
//! four commands are total: an out-of-context call (e.g. `lap()` while
//! paused) is a no-op reported through the `bool` return, never an error.
//!
//! # Examples
//!
//! ```
//! use tally_core::{ManualClock, Stopwatch};
//!
//! let clock = ManualClock::new();
//! let mut watch = Stopwatch::with_clock(&clock);
//!
//! watch.start();
//! clock.advance(1500);
//! watch.lap();
//! clock.advance(1000);
//! watch.pause();
//!
//! assert_eq!(watch.elapsed_ms(), 2500);
//! assert_eq!(watch.laps()[0].duration_ms, 1500);
//! ```

use crate::clock::{Clock, MonotonicClock};
use serde::{Deserialize, Serialize};

/// Run state of a [`Stopwatch`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RunState {
    /// Not started, or cleared by reset. Elapsed time is zero.
    #[default]
    Stopped,
    /// Accumulating time against the current anchor.
    Running,
    /// Elapsed time frozen; resumable without losing banked time.
    Paused,
}

impl RunState {
    /// Whether the watch is currently accumulating time.
    #[must_use]
    pub const fn is_running(self) -> bool {
        matches!(self, Self::Running)
    }
}

/// One recorded lap. Immutable once appended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lap {
    /// 1-based lap number, unique and strictly increasing.
    pub index: u32,
    /// Total elapsed time at the instant the lap was recorded.
    pub cumulative_ms: u64,
    /// Time since the previous lap (or since start for the first lap).
    pub duration_ms: u64,
    /// Clock reading at creation. Informational only.
    pub recorded_at_ms: u64,
}

/// Summary statistics over a non-empty lap sequence.
///
/// Recomputed on demand by [`Stopwatch::stats`]; never stored. When several
/// laps share the minimum or maximum duration, every one of them appears in
/// the corresponding index list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LapStats {
    /// Shortest lap duration in milliseconds.
    pub fastest_ms: u64,
    /// Longest lap duration in milliseconds.
    pub slowest_ms: u64,
    /// Mean lap duration in milliseconds.
    pub average_ms: f64,
    /// Zero-based indices of all laps tied for fastest.
    pub fastest_laps: Vec<usize>,
    /// Zero-based indices of all laps tied for slowest.
    pub slowest_laps: Vec<usize>,
}

impl LapStats {
    /// Compute statistics over a lap slice. `None` when empty.
    #[must_use]
    pub fn from_laps(laps: &[Lap]) -> Option<Self> {
        if laps.is_empty() {
            return None;
        }

        let mut fastest = u64::MAX;
        let mut slowest = 0u64;
        let mut total = 0u64;
        for lap in laps {
            fastest = fastest.min(lap.duration_ms);
            slowest = slowest.max(lap.duration_ms);
            total += lap.duration_ms;
        }

        let collect_ties = |target: u64| {
            laps.iter()
                .enumerate()
                .filter(|(_, l)| l.duration_ms == target)
                .map(|(i, _)| i)
                .collect::<Vec<_>>()
        };

        Some(Self {
            fastest_ms: fastest,
            slowest_ms: slowest,
            average_ms: total as f64 / laps.len() as f64,
            fastest_laps: collect_ties(fastest),
            slowest_laps: collect_ties(slowest),
        })
    }

    /// Whether the lap at `index` is tied for fastest.
    #[must_use]
    pub fn is_fastest(&self, index: usize) -> bool {
        self.fastest_laps.contains(&index)
    }

    /// Whether the lap at `index` is tied for slowest.
    #[must_use]
    pub fn is_slowest(&self, index: usize) -> bool {
        self.slowest_laps.contains(&index)
    }
}

/// Stopwatch engine: elapsed-time accounting plus the lap ledger.
///
/// Elapsed time while running is `banked + (now − anchor)`, recomputed from
/// the clock on every read. Pausing banks the interval; resuming opens a new
/// anchor. Display ticks are a caller concern and never enter this
/// arithmetic, so a slow or jittery repaint loop cannot drift the total.
#[derive(Debug)]
pub struct Stopwatch<C: Clock = MonotonicClock> {
    clock: C,
    run_state: RunState,
    /// Clock reading when the current running interval began.
    anchor_ms: Option<u64>,
    /// Elapsed time banked from running intervals before the anchor.
    banked_ms: u64,
    /// Elapsed value while not running.
    frozen_ms: u64,
    laps: Vec<Lap>,
}

impl Stopwatch<MonotonicClock> {
    /// Create a stopped watch on the system monotonic clock.
    #[must_use]
    pub fn new() -> Self {
        Self::with_clock(MonotonicClock::new())
    }
}

impl Default for Stopwatch<MonotonicClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> Stopwatch<C> {
    /// Create a stopped watch on the given clock.
    pub fn with_clock(clock: C) -> Self {
        Self {
            clock,
            run_state: RunState::Stopped,
            anchor_ms: None,
            banked_ms: 0,
            frozen_ms: 0,
            laps: Vec::new(),
        }
    }

    /// Current run state.
    #[must_use]
    pub const fn run_state(&self) -> RunState {
        self.run_state
    }

    /// Total elapsed running time in milliseconds.
    ///
    /// Live (clock-derived) while running; frozen otherwise.
    #[must_use]
    pub fn elapsed_ms(&self) -> u64 {
        match (self.run_state, self.anchor_ms) {
            (RunState::Running, Some(anchor)) => {
                self.banked_ms + self.clock.now_ms().saturating_sub(anchor)
            }
            _ => self.frozen_ms,
        }
    }

    /// Recorded laps in insertion order.
    #[must_use]
    pub fn laps(&self) -> &[Lap] {
        &self.laps
    }

    /// Lap statistics, or `None` when no laps have been recorded.
    #[must_use]
    pub fn stats(&self) -> Option<LapStats> {
        LapStats::from_laps(&self.laps)
    }

    /// Begin or resume timing.
    ///
    /// From `Stopped` or `Paused`, anchors at the current clock reading and
    /// banks any frozen elapsed time so a resume loses nothing. A `start`
    /// while already running is ignored and must not move the anchor.
    /// Returns whether the state changed.
    pub fn start(&mut self) -> bool {
        if self.run_state.is_running() {
            return false;
        }
        self.banked_ms = self.frozen_ms;
        self.anchor_ms = Some(self.clock.now_ms());
        self.run_state = RunState::Running;
        true
    }

    /// Freeze the elapsed total and stop accumulating.
    ///
    /// Only effective while running. Returns whether the state changed.
    pub fn pause(&mut self) -> bool {
        if !self.run_state.is_running() {
            return false;
        }
        self.frozen_ms = self.elapsed_ms();
        self.anchor_ms = None;
        self.run_state = RunState::Paused;
        true
    }

    /// Record a lap at the current elapsed time.
    ///
    /// Guard: the watch must be running and the new cumulative value must
    /// strictly exceed the previous lap's (equivalently, elapsed must be
    /// positive for the first lap). An ignored call returns `false` so the
    /// host can grey out its lap affordance; it is not an error.
    pub fn lap(&mut self) -> bool {
        if !self.run_state.is_running() {
            return false;
        }
        let cumulative = self.elapsed_ms();
        let previous = self.laps.last().map_or(0, |l| l.cumulative_ms);
        if cumulative <= previous {
            return false;
        }
        self.laps.push(Lap {
            index: self.laps.len() as u32 + 1,
            cumulative_ms: cumulative,
            duration_ms: cumulative - previous,
            recorded_at_ms: self.clock.now_ms(),
        });
        true
    }

    /// Clear everything: elapsed time, laps, anchor. Always lands in
    /// `Stopped`. Idempotent; returns `false` when there was nothing to
    /// clear.
    pub fn reset(&mut self) -> bool {
        let was_zero = self.run_state == RunState::Stopped
            && self.frozen_ms == 0
            && self.laps.is_empty();
        self.run_state = RunState::Stopped;
        self.anchor_ms = None;
        self.banked_ms = 0;
        self.frozen_ms = 0;
        self.laps.clear();
        !was_zero
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;

    fn watch(clock: &ManualClock) -> Stopwatch<&ManualClock> {
        Stopwatch::with_clock(clock)
    }

    mod transitions {
        use super::*;

        #[test]
        fn test_initial_state() {
            let clock = ManualClock::new();
            let w = watch(&clock);
            assert_eq!(w.run_state(), RunState::Stopped);
            assert_eq!(w.elapsed_ms(), 0);
            assert!(w.laps().is_empty());
            assert!(w.stats().is_none());
        }

        #[test]
        fn test_start_from_stopped() {
            let clock = ManualClock::new();
            let mut w = watch(&clock);
            assert!(w.start());
            assert_eq!(w.run_state(), RunState::Running);
        }

        #[test]
        fn test_start_while_running_is_ignored() {
            let clock = ManualClock::new();
            let mut w = watch(&clock);
            w.start();
            clock.advance(700);
            // A repeated start must not re-anchor and wipe the interval.
            assert!(!w.start());
            assert_eq!(w.elapsed_ms(), 700);
        }

        #[test]
        fn test_pause_freezes_elapsed() {
            let clock = ManualClock::new();
            let mut w = watch(&clock);
            w.start();
            clock.advance(1200);
            assert!(w.pause());
            assert_eq!(w.run_state(), RunState::Paused);
            clock.advance(5000);
            assert_eq!(w.elapsed_ms(), 1200);
        }

        #[test]
        fn test_pause_while_not_running_is_ignored() {
            let clock = ManualClock::new();
            let mut w = watch(&clock);
            assert!(!w.pause());
            w.start();
            w.pause();
            assert!(!w.pause());
            assert_eq!(w.run_state(), RunState::Paused);
        }

        #[test]
        fn test_resume_banks_prior_interval() {
            let clock = ManualClock::new();
            let mut w = watch(&clock);
            w.start();
            clock.advance(1000);
            w.pause();
            clock.advance(9999); // paused gap must not count
            w.start();
            clock.advance(500);
            assert_eq!(w.elapsed_ms(), 1500);
        }

        #[test]
        fn test_reset_from_each_state() {
            let clock = ManualClock::new();

            let mut w = watch(&clock);
            w.start();
            clock.advance(100);
            assert!(w.reset());
            assert_eq!(w.run_state(), RunState::Stopped);
            assert_eq!(w.elapsed_ms(), 0);

            w.start();
            clock.advance(100);
            w.pause();
            assert!(w.reset());
            assert_eq!(w.elapsed_ms(), 0);

            // Already zeroed: idempotent no-op.
            assert!(!w.reset());
            assert_eq!(w.run_state(), RunState::Stopped);
        }

        #[test]
        fn test_reset_clears_laps() {
            let clock = ManualClock::new();
            let mut w = watch(&clock);
            w.start();
            clock.advance(300);
            w.lap();
            w.reset();
            assert!(w.laps().is_empty());
        }
    }

    mod laps {
        use super::*;

        #[test]
        fn test_lap_records_cumulative_and_duration() {
            let clock = ManualClock::new();
            let mut w = watch(&clock);
            w.start();
            clock.advance(1500);
            assert!(w.lap());
            clock.advance(2000);
            assert!(w.lap());

            let laps = w.laps();
            assert_eq!(laps.len(), 2);
            assert_eq!(laps[0].index, 1);
            assert_eq!(laps[0].cumulative_ms, 1500);
            assert_eq!(laps[0].duration_ms, 1500);
            assert_eq!(laps[1].index, 2);
            assert_eq!(laps[1].cumulative_ms, 3500);
            assert_eq!(laps[1].duration_ms, 2000);
        }

        #[test]
        fn test_lap_guard_requires_running() {
            let clock = ManualClock::new();
            let mut w = watch(&clock);
            assert!(!w.lap()); // stopped
            w.start();
            clock.advance(100);
            w.pause();
            assert!(!w.lap()); // paused
            assert!(w.laps().is_empty());
        }

        #[test]
        fn test_lap_guard_requires_positive_elapsed() {
            let clock = ManualClock::new();
            let mut w = watch(&clock);
            w.start();
            assert!(!w.lap()); // elapsed still zero
            assert!(w.laps().is_empty());
        }

        #[test]
        fn test_lap_same_instant_is_ignored() {
            let clock = ManualClock::new();
            let mut w = watch(&clock);
            w.start();
            clock.advance(250);
            assert!(w.lap());
            // No time has passed; a second lap would break strict increase.
            assert!(!w.lap());
            assert_eq!(w.laps().len(), 1);
        }

        #[test]
        fn test_lap_does_not_disturb_elapsed_or_state() {
            let clock = ManualClock::new();
            let mut w = watch(&clock);
            w.start();
            clock.advance(800);
            w.lap();
            assert_eq!(w.run_state(), RunState::Running);
            assert_eq!(w.elapsed_ms(), 800);
        }

        #[test]
        fn test_telescoping_sum() {
            let clock = ManualClock::new();
            let mut w = watch(&clock);
            w.start();
            for step in [130u64, 910, 47, 2200, 5] {
                clock.advance(step);
                w.lap();
            }
            let laps = w.laps();
            let sum: u64 = laps.iter().map(|l| l.duration_ms).sum();
            assert_eq!(sum, laps.last().map(|l| l.cumulative_ms).unwrap_or(0));
        }

        #[test]
        fn test_laps_survive_pause_resume() {
            let clock = ManualClock::new();
            let mut w = watch(&clock);
            w.start();
            clock.advance(1000);
            w.lap();
            w.pause();
            w.start();
            clock.advance(400);
            w.lap();
            assert_eq!(w.laps()[1].cumulative_ms, 1400);
            assert_eq!(w.laps()[1].duration_ms, 400);
        }
    }

    mod stats {
        use super::*;

        fn lap(index: u32, cumulative_ms: u64, duration_ms: u64) -> Lap {
            Lap {
                index,
                cumulative_ms,
                duration_ms,
                recorded_at_ms: cumulative_ms,
            }
        }

        #[test]
        fn test_stats_empty_is_none() {
            assert!(LapStats::from_laps(&[]).is_none());
        }

        #[test]
        fn test_stats_basic() {
            let laps = [
                lap(1, 1000, 1000),
                lap(2, 4000, 3000),
                lap(3, 6000, 2000),
            ];
            let stats = LapStats::from_laps(&laps).expect("non-empty");
            assert_eq!(stats.fastest_ms, 1000);
            assert_eq!(stats.slowest_ms, 3000);
            assert_eq!(stats.average_ms, 2000.0);
            assert_eq!(stats.fastest_laps, vec![0]);
            assert_eq!(stats.slowest_laps, vec![1]);
        }

        #[test]
        fn test_stats_single_lap_is_both_extremes() {
            let laps = [lap(1, 500, 500)];
            let stats = LapStats::from_laps(&laps).expect("non-empty");
            assert_eq!(stats.fastest_ms, 500);
            assert_eq!(stats.slowest_ms, 500);
            assert_eq!(stats.fastest_laps, vec![0]);
            assert_eq!(stats.slowest_laps, vec![0]);
        }

        #[test]
        fn test_stats_flags_all_ties() {
            let laps = [
                lap(1, 1000, 1000),
                lap(2, 2000, 1000),
                lap(3, 5000, 3000),
            ];
            let stats = LapStats::from_laps(&laps).expect("non-empty");
            assert_eq!(stats.fastest_laps, vec![0, 1]);
            assert!(stats.is_fastest(0));
            assert!(stats.is_fastest(1));
            assert!(!stats.is_fastest(2));
            assert!(stats.is_slowest(2));
        }

        #[test]
        fn test_stats_from_engine() {
            let clock = ManualClock::new();
            let mut w = Stopwatch::with_clock(&clock);
            w.start();
            clock.advance(1000);
            w.lap();
            clock.advance(3000);
            w.lap();
            clock.advance(2000);
            w.lap();
            let stats = w.stats().expect("three laps");
            assert_eq!(stats.fastest_ms, 1000);
            assert_eq!(stats.slowest_ms, 3000);
            assert_eq!(stats.average_ms, 2000.0);
        }
    }

    mod serde_round_trip {
        use super::*;

        #[test]
        fn test_lap_json() {
            let lap = Lap {
                index: 2,
                cumulative_ms: 3500,
                duration_ms: 2000,
                recorded_at_ms: 3500,
            };
            let json = serde_json::to_string(&lap).expect("serialize");
            let back: Lap = serde_json::from_str(&json).expect("deserialize");
            assert_eq!(back, lap);
        }

        #[test]
        fn test_run_state_json() {
            let json = serde_json::to_string(&RunState::Paused).expect("serialize");
            assert_eq!(json, "\"Paused\"");
        }
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Elapsed time never decreases while continuously running.
            #[test]
            fn prop_monotone_while_running(steps in prop::collection::vec(0u64..10_000, 1..50)) {
                let clock = ManualClock::new();
                let mut w = Stopwatch::with_clock(&clock);
                w.start();
                let mut last = w.elapsed_ms();
                for step in steps {
                    clock.advance(step);
                    let now = w.elapsed_ms();
                    prop_assert!(now >= last);
                    last = now;
                }
            }

            /// Lap durations always telescope back to the last cumulative.
            #[test]
            fn prop_telescoping(steps in prop::collection::vec(1u64..100_000, 1..40)) {
                let clock = ManualClock::new();
                let mut w = Stopwatch::with_clock(&clock);
                w.start();
                for step in steps {
                    clock.advance(step);
                    w.lap();
                }
                let laps = w.laps();
                prop_assert!(!laps.is_empty());
                let sum: u64 = laps.iter().map(|l| l.duration_ms).sum();
                prop_assert_eq!(sum, laps[laps.len() - 1].cumulative_ms);
                for pair in laps.windows(2) {
                    prop_assert!(pair[0].cumulative_ms < pair[1].cumulative_ms);
                }
            }

            /// Pause/resume cycles conserve time exactly on a manual clock:
            /// the total equals the sum of the running intervals.
            #[test]
            fn prop_pause_resume_conservation(
                intervals in prop::collection::vec((1u64..50_000, 0u64..50_000), 1..20)
            ) {
                let clock = ManualClock::new();
                let mut w = Stopwatch::with_clock(&clock);
                let mut expected = 0u64;
                for (run, gap) in intervals {
                    w.start();
                    clock.advance(run);
                    expected += run;
                    w.pause();
                    clock.advance(gap);
                }
                prop_assert_eq!(w.elapsed_ms(), expected);
            }

            /// Reset is idempotent from any reachable state.
            #[test]
            fn prop_reset_idempotent(run in 0u64..10_000, take_lap in any::<bool>()) {
                let clock = ManualClock::new();
                let mut w = Stopwatch::with_clock(&clock);
                w.start();
                clock.advance(run);
                if take_lap {
                    w.lap();
                }
                w.reset();
                w.reset();
                prop_assert_eq!(w.run_state(), RunState::Stopped);
                prop_assert_eq!(w.elapsed_ms(), 0);
                prop_assert!(w.laps().is_empty());
            }
        }
    }
}
