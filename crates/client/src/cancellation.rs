//! Cooperative cancellation for client calls.
//!
//! Responsibilities:
//! - Provide a clone-able token a caller hands to every API method.
//! - Let a call abort its rate limiter wait when the token fires.
//!
//! Does NOT handle:
//! - Installing signal handlers (the CLI wires Ctrl+C to [`CancellationToken::cancel`]).
//! - Aborting an HTTP exchange already in flight; callers race the whole call with
//!   [`CancellationToken::cancelled`] when they need that.
//!
//! Invariants:
//! - Once cancelled, a token remains cancelled forever.
//! - Clones share state: cancelling one cancels all.

use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

use tokio::sync::Notify;

/// Cancellation token usable across async tasks.
#[derive(Clone, Debug, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
    notify: Arc<Notify>,
}

impl CancellationToken {
    /// Create a new, non-cancelled token.
    pub fn new() -> Self {
        Self::default()
    }

    /// Cancel token (idempotent).
    pub fn cancel(&self) {
        let was_cancelled = self.cancelled.swap(true, Ordering::SeqCst);
        if !was_cancelled {
            self.notify.notify_waiters();
        }
    }

    /// True if cancellation has been requested.
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    /// Await cancellation.
    ///
    /// Safe against missed notifications by creating `notified()` future first,
    /// then checking atomic state.
    pub async fn cancelled(&self) {
        let notified = self.notify.notified();
        if self.is_cancelled() {
            return;
        }
        notified.await;
    }
}
