//! Cooperative cancellation token.
//!
//! Cancellation is poll-based: a search reads the flag at each node and
//! unwinds on its own. Nothing is interrupted preemptively.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Duration;

/// Something that can be asked whether it has been cancelled.
pub trait Cancellable {
    /// Check if cancellation has been requested.
    fn is_cancelled(&self) -> bool;

    /// Request cancellation.
    fn cancel(&self);
}

/// Shared cancellation flag wrapping an `AtomicBool`.
///
/// Clones observe and set the same flag, so a clone handed to another
/// thread can stop an in-flight search.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    /// Create a new token (not cancelled).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear the flag so the token can scope another search.
    pub fn reset(&self) {
        self.cancelled.store(false, Ordering::Release);
    }
}

impl Cancellable for CancellationToken {
    fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }

    fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }
}

/// Spawn a timer thread that cancels `token` after `delay`.
///
/// This is how a time limit is layered on top of the poll-based flag. The
/// returned [`CancelTimer`] owns the thread: dropping or disarming it stops
/// the timer without cancelling, so a search that finishes early leaves
/// nothing running.
#[must_use]
pub fn cancel_after(token: &CancellationToken, delay: Duration) -> CancelTimer {
    let token = token.clone();
    let (disarm, disarmed) = mpsc::channel::<()>();
    let handle = std::thread::spawn(move || match disarmed.recv_timeout(delay) {
        Err(RecvTimeoutError::Timeout) => {
            tracing::debug!(delay_ms = delay.as_millis(), "time limit reached; cancelling");
            token.cancel();
            true
        }
        Ok(()) | Err(RecvTimeoutError::Disconnected) => false,
    });
    CancelTimer {
        disarm: Some(disarm),
        handle: Some(handle),
    }
}

/// Handle to a timer started by [`cancel_after`].
///
/// Dropping the handle disarms the timer and joins its thread.
#[derive(Debug)]
pub struct CancelTimer {
    disarm: Option<Sender<()>>,
    handle: Option<JoinHandle<bool>>,
}

impl CancelTimer {
    /// Stop the timer if it has not fired and wait for its thread to exit.
    ///
    /// Returns whether the timer fired (and so cancelled the token).
    pub fn disarm(mut self) -> bool {
        self.finish(true)
    }

    /// Wait for the timer to fire. Returns `true` once it has cancelled
    /// the token.
    pub fn wait(mut self) -> bool {
        self.finish(false)
    }

    fn finish(&mut self, disarm: bool) -> bool {
        if disarm {
            // Closing the channel wakes the thread with `Disconnected`.
            self.disarm.take();
        }
        let fired = self
            .handle
            .take()
            .is_some_and(|handle| handle.join().unwrap_or(false));
        self.disarm.take();
        fired
    }
}

impl Drop for CancelTimer {
    fn drop(&mut self) {
        self.finish(true);
    }
}
