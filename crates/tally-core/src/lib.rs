//! Core engine for the Tally tool suite.
//!
//! This crate provides the one stateful component in the suite plus its
//! supporting seams:
//! - Stopwatch state machine with lap ledger: [`Stopwatch`], [`Lap`],
//!   [`LapStats`]
//! - Monotonic time sources: [`Clock`], [`MonotonicClock`], [`ManualClock`]
//! - Display formatting: [`format_compact`], [`format_verbose`]
//! - Scoped repaint driver: [`Ticker`]
//! - Host-facing state store: [`Store`], [`StopwatchState`]

mod clock;
mod format;
mod state;
mod stopwatch;
mod ticker;

pub use clock::{Clock, ManualClock, MonotonicClock};
pub use format::{format_compact, format_verbose};
pub use state::{State, StopwatchMsg, StopwatchState, Store, SubscriptionId};
pub use stopwatch::{Lap, LapStats, RunState, Stopwatch};
pub use ticker::{Ticker, DEFAULT_TICK};
