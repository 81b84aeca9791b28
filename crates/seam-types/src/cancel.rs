//! Cooperative cancellation for long comparisons.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::error::{ComparisonError, ComparisonResult};

/// A shared flag that comparison loops poll.
///
/// Clones share the same flag, so a token handed to a comparison running on
/// a worker thread can be cancelled from any other thread.
#[derive(Clone, Debug, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    /// Create a token that is not cancelled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    /// Returns `true` once [`cancel`](Self::cancel) was called on any clone.
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }

    /// Fail with [`ComparisonError::Cancelled`] if cancellation was requested.
    pub fn check(&self) -> ComparisonResult<()> {
        if self.is_cancelled() {
            return Err(ComparisonError::Cancelled);
        }
        Ok(())
    }
}
