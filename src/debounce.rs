//! Trailing-edge debouncer
//!
//! Each `schedule` restarts the quiet period; only the last value scheduled
//! is delivered, once no new value arrives for `delay`. Cancelling stops a
//! timer that has not fired yet; a value already sent stays in the channel,
//! so receivers must check it against their current state.

use std::time::Duration;

use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;

/// Default quiet period for search input
pub const DEFAULT_DELAY: Duration = Duration::from_millis(500);

/// Delivers the last scheduled value on `tx` after a quiet period
#[derive(Debug)]
pub struct Debouncer<T: Send + 'static> {
    delay: Duration,
    tx: UnboundedSender<T>,
    pending: Option<JoinHandle<()>>,
}

impl<T: Send + 'static> Debouncer<T> {
    pub fn new(delay: Duration, tx: UnboundedSender<T>) -> Self {
        Self {
            delay,
            tx,
            pending: None,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Restart the quiet period with a new value.
    ///
    /// Must be called from within a tokio runtime.
    pub fn schedule(&mut self, value: T) {
        self.cancel();

        let delay = self.delay;
        let tx = self.tx.clone();
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            // Receiver gone means the app is shutting down
            let _ = tx.send(value);
        }));
    }

    /// Stop the pending timer, if any. Does not recall a value already sent.
    pub fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }

    /// A value is waiting for its quiet period to end
    pub fn is_pending(&self) -> bool {
        self.pending.as_ref().is_some_and(|h| !h.is_finished())
    }
}

impl<T: Send + 'static> Drop for Debouncer<T> {
    fn drop(&mut self) {
        self.cancel();
    }
}
