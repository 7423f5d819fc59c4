//! Interruptible sleeping for the worker loops.

use std::sync::{Arc, Condvar, Mutex};
use std::time::Duration;

/// A one-shot stop flag that sleeping workers wake up for.
///
/// Clones share the flag.
#[derive(Debug, Clone, Default)]
pub struct StopSignal {
    inner: Arc<StopInner>,
}

#[derive(Debug, Default)]
struct StopInner {
    stopped: Mutex<bool>,
    wake: Condvar,
}

impl StopSignal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raises the flag and wakes every sleeper.
    pub fn stop(&self) {
        let mut stopped = self.inner.stopped.lock().unwrap();
        *stopped = true;
        self.inner.wake.notify_all();
    }

    pub fn is_stopped(&self) -> bool {
        *self.inner.stopped.lock().unwrap()
    }

    /// Sleeps for `duration` unless stopped first.
    ///
    /// Returns true if the full duration elapsed and false if the signal was
    /// (or already had been) raised.
    pub fn sleep(&self, duration: Duration) -> bool {
        let stopped = self.inner.stopped.lock().unwrap();
        let (stopped, _) = self
            .inner
            .wake
            .wait_timeout_while(stopped, duration, |stopped| !*stopped)
            .unwrap();
        !*stopped
    }
}
