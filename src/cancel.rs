//! Cooperative cancellation.
//!
//! A single token is shared by the caller, the poller, and the command
//! runner. Cancellation takes effect at the next suspension point: the
//! polling sleep is interrupted, or the running subprocess is terminated.

use std::sync::Arc;
use tokio::sync::watch;

/// Clonable cancellation handle.
///
/// The flag is sticky: once cancelled, every present and future waiter
/// observes it.
#[derive(Debug, Clone)]
pub struct CancelToken {
    tx: Arc<watch::Sender<bool>>,
}

impl CancelToken {
    /// Create a token in the not-cancelled state.
    #[must_use]
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(false);
        Self { tx: Arc::new(tx) }
    }

    /// Signal cancellation to every holder of this token.
    pub fn cancel(&self) {
        let _ = self.tx.send(true);
    }

    /// Whether cancellation has been signalled.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        *self.tx.borrow()
    }

    /// Resolve once cancellation is signalled.
    pub async fn cancelled(&self) {
        let mut rx = self.tx.subscribe();
        // The sender lives inside self, so wait_for can only fail if every
        // token clone is dropped, at which point nobody is awaiting this.
        let _ = rx.wait_for(|cancelled| *cancelled).await;
    }
}

impl Default for CancelToken {
    fn default() -> Self {
        Self::new()
    }
}
