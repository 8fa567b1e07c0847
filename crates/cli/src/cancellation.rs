//! CLI cancellation utilities.
//!
//! Responsibilities:
//! - Define a single, recognizable `Cancelled` error used to signal user-initiated
//!   cancellation (Ctrl+C/SIGINT) through `anyhow::Result`.
//! - Race a client call against the shared [`CancellationToken`].
//! - Centralize the cancellation message.
//!
//! Does NOT handle:
//! - Installing signal handlers (see `main`).
//!
//! Invariants:
//! - A client-side `ClientError::Cancelled` and a token fired mid-request both
//!   surface as `Cancelled`.

use std::fmt;
use std::future::Future;

use tfe_client::{CancellationToken, ClientError};

/// Marker error used to indicate user-driven cancellation.
#[derive(Debug, Clone, Copy)]
pub struct Cancelled;

impl fmt::Display for Cancelled {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "cancelled")
    }
}

impl std::error::Error for Cancelled {}

/// Returns true if this anyhow error represents a cancellation.
pub fn is_cancelled_error(err: &anyhow::Error) -> bool {
    err.is::<Cancelled>()
}

/// Print standard cancellation message to stderr.
pub fn print_cancelled_message() {
    eprintln!("^C\nOperation cancelled by user");
}

/// Await `call`, abandoning it as soon as `cancel` fires.
pub async fn run_cancellable<T, F>(cancel: &CancellationToken, call: F) -> anyhow::Result<T>
where
    F: Future<Output = Result<T, ClientError>>,
{
    tokio::select! {
        biased;
        _ = cancel.cancelled() => Err(Cancelled.into()),
        result = call => result.map_err(|e| {
            if e.is_cancelled() {
                anyhow::Error::new(Cancelled)
            } else {
                anyhow::Error::new(e)
            }
        }),
    }
}
