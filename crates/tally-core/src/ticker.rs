//! Scoped periodic callback for display refresh.
//!
//! The stopwatch never needs a timer for correctness; a host only needs one
//! to repaint the live elapsed value. [`Ticker`] wraps that repaint driver
//! in an owned resource: dropping it stops the tick and joins the worker, so
//! every exit path from the running state (pause, reset, host teardown)
//! cancels the timer with it.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

/// Default tick interval: comfortably under 50 ms so a centisecond display
/// never looks stale.
pub const DEFAULT_TICK: Duration = Duration::from_millis(16);

/// Owned periodic callback. Cancelled on drop.
#[derive(Debug)]
pub struct Ticker {
    stop: Arc<AtomicBool>,
    handle: Option<thread::JoinHandle<()>>,
}

impl Ticker {
    /// Invoke `callback` every `interval` until the ticker is dropped.
    ///
    /// The callback runs on a dedicated worker thread; keep it short (a
    /// repaint or a channel send). Tick cadence affects display smoothness
    /// only, never elapsed-time accuracy.
    pub fn spawn<F>(interval: Duration, mut callback: F) -> Self
    where
        F: FnMut() + Send + 'static,
    {
        let stop = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&stop);
        let handle = thread::spawn(move || {
            while !flag.load(Ordering::Relaxed) {
                callback();
                thread::sleep(interval);
            }
        });
        Self {
            stop,
            handle: Some(handle),
        }
    }

    /// Invoke `callback` at [`DEFAULT_TICK`] until dropped.
    pub fn spawn_default<F>(callback: F) -> Self
    where
        F: FnMut() + Send + 'static,
    {
        Self::spawn(DEFAULT_TICK, callback)
    }

    /// Stop ticking and wait for the worker to finish. Called automatically
    /// on drop; explicit form for hosts that want the join point visible.
    pub fn cancel(mut self) {
        self.cancel_inner();
    }

    fn cancel_inner(&mut self) {
        self.stop.store(true, Ordering::Relaxed);
        if let Some(handle) = self.handle.take() {
            // A panicking callback already surfaced its problem; the owner
            // of the ticker should not panic again on teardown.
            let _ = handle.join();
        }
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.cancel_inner();
    }
}
