//! Cooperative cancellation
//!
//! Every suspending operation accepts a [`CancellationToken`] and checks it at
//! defined checkpoints: before issuing remote calls and again before committing
//! any write to the event store. A cancelled operation performs no mutation.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Cloneable cancellation flag shared between an operation and its issuer.
///
/// Cancellation is cooperative: setting the flag does not interrupt an
/// in-flight call, it only guarantees the call commits nothing afterwards.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    /// Create a fresh, non-cancelled token
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark the token as cancelled
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    /// Check whether cancellation has been requested
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}
