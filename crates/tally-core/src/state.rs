//! State ownership and change notification for hosts.
//!
//! The engine is a plain object; whatever layer drives the UI owns it
//! through a [`Store`] and subscribes to change notifications instead of
//! holding the state inside a rendering framework. Updates follow the
//! `State + Message → handled?` shape: a message that the current state
//! ignores (a lap while paused, a second start) reports `false` and fires
//! no notification, which is exactly the signal a host needs to grey out
//! the matching control.
//!
//! # Examples
//!
//! ```
//! use tally_core::{ManualClock, Store, StopwatchMsg, StopwatchState};
//!
//! let clock = ManualClock::new();
//! let mut store = Store::new(StopwatchState::with_clock(&clock));
//!
//! assert!(store.dispatch(StopwatchMsg::Start));
//! clock.advance(1500);
//! assert!(store.dispatch(StopwatchMsg::Lap));
//! assert_eq!(store.state().watch().laps().len(), 1);
//! ```

use crate::clock::{Clock, MonotonicClock};
use crate::stopwatch::Stopwatch;

/// A state object a [`Store`] can own.
pub trait State {
    /// Message type for state updates.
    type Message;

    /// Apply a message. Returns `false` when the message was ignored in the
    /// current state (a no-op, not an error).
    fn update(&mut self, msg: Self::Message) -> bool;
}

/// Handle for removing a subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Subscriber<S> = Box<dyn FnMut(&S)>;

/// Owns a [`State`] and notifies subscribers after every handled message.
///
/// Ignored messages fire no notification: nothing changed.
pub struct Store<S: State> {
    state: S,
    next_id: u64,
    subscribers: Vec<(SubscriptionId, Subscriber<S>)>,
}

impl<S: State> Store<S> {
    /// Create a store around an initial state.
    pub fn new(initial: S) -> Self {
        Self {
            state: initial,
            next_id: 0,
            subscribers: Vec::new(),
        }
    }

    /// Read access to the current state.
    pub fn state(&self) -> &S {
        &self.state
    }

    /// Register a change listener. It is NOT called for the current state;
    /// only for changes after registration.
    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: FnMut(&S) + 'static,
    {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.subscribers.push((id, Box::new(listener)));
        id
    }

    /// Remove a listener. Unknown ids are ignored.
    pub fn unsubscribe(&mut self, id: SubscriptionId) {
        self.subscribers.retain(|(sid, _)| *sid != id);
    }

    /// Apply a message and notify subscribers if it was handled.
    ///
    /// Returns the handled flag from [`State::update`].
    pub fn dispatch(&mut self, msg: S::Message) -> bool {
        let handled = self.state.update(msg);
        if handled {
            for (_, listener) in &mut self.subscribers {
                listener(&self.state);
            }
        }
        handled
    }
}

/// Commands a host can send to the stopwatch. All zero-argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopwatchMsg {
    /// Begin or resume timing.
    Start,
    /// Freeze the elapsed total.
    Pause,
    /// Record a lap checkpoint.
    Lap,
    /// Clear everything back to stopped-at-zero.
    Reset,
}

/// Store-ready wrapper around the stopwatch engine.
pub struct StopwatchState<C: Clock = MonotonicClock> {
    watch: Stopwatch<C>,
}

impl StopwatchState<MonotonicClock> {
    /// Stopwatch on the system monotonic clock.
    #[must_use]
    pub fn new() -> Self {
        Self {
            watch: Stopwatch::new(),
        }
    }
}

impl Default for StopwatchState<MonotonicClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> StopwatchState<C> {
    /// Stopwatch on an injected clock.
    pub fn with_clock(clock: C) -> Self {
        Self {
            watch: Stopwatch::with_clock(clock),
        }
    }

    /// The underlying engine, for reads (run state, elapsed, laps, stats).
    pub fn watch(&self) -> &Stopwatch<C> {
        &self.watch
    }
}

impl<C: Clock> State for StopwatchState<C> {
    type Message = StopwatchMsg;

    fn update(&mut self, msg: Self::Message) -> bool {
        match msg {
            StopwatchMsg::Start => self.watch.start(),
            StopwatchMsg::Pause => self.watch.pause(),
            StopwatchMsg::Lap => self.watch.lap(),
            StopwatchMsg::Reset => self.watch.reset(),
        }
    }
}
