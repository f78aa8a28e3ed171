//! Tally: everyday calculators and a lap timer.
//!
//! Umbrella crate re-exporting the two halves of the suite:
//! - [`core`]: the stopwatch engine, clocks, formatting, and the host-facing
//!   state store
//! - [`tools`]: the pure calculator catalog (health, finance, dates, text,
//!   units)

pub use tally_core as core;
pub use tally_tools as tools;

pub use tally_core::{
    format_compact, format_verbose, Clock, Lap, LapStats, ManualClock, MonotonicClock, RunState,
    State, Stopwatch, StopwatchMsg, StopwatchState, Store, Ticker,
};
pub use tally_tools::{catalog, InputError, ToolSpec};
