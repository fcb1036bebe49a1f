//! Cancelable single-shot timer.

use std::time::Duration;

use tokio::task::JoinHandle;

/// A replaceable, cancelable delay handle.
///
/// At most one callback is pending at a time: scheduling aborts the
/// previously pending one, so only the most recently scheduled callback
/// can fire. Cancellation is only effective while the delay is still
/// running; once the delay elapses the callback runs to completion.
#[derive(Debug, Default)]
pub struct DebounceTimer {
    handle: Option<JoinHandle<()>>,
}

impl DebounceTimer {
    /// Create an idle timer.
    #[must_use]
    pub fn new() -> Self {
        Self { handle: None }
    }

    /// Replace any pending callback with `fire`, to run after `delay`.
    ///
    /// `fire` executes synchronously when the delay elapses; long-running
    /// work belongs in a task it spawns, so that a later `schedule` or
    /// `cancel` cannot abort work already dispatched.
    pub fn schedule<F>(&mut self, delay: Duration, fire: F)
    where
        F: FnOnce() + Send + 'static,
    {
        self.cancel();
        self.handle = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            fire();
        }));
    }

    /// Abort the pending callback, if any.
    pub fn cancel(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }

    /// Whether a callback is still pending.
    #[must_use]
    pub fn is_armed(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }
}

impl Drop for DebounceTimer {
    fn drop(&mut self) {
        self.cancel();
    }
}
