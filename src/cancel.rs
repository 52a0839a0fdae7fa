//! Cooperative cancellation for long-running generation calls.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Shared flag for cancelling a generation run from another thread.
///
/// Cloning is cheap; all clones observe the same flag. Generation code polls
/// the flag between row batches, never mid-cell, so a cancelled run stops at
/// the next row boundary and returns `GenerationError::Cancelled` without
/// publishing any partially filled buffer.
#[derive(Clone, Default)]
pub struct CancelFlag {
    inner: Arc<AtomicBool>,
}

impl CancelFlag {
    /// Creates a new, unset flag.
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests cancellation. Safe to call from any thread, any number of times.
    pub fn cancel(&self) {
        self.inner.store(true, Ordering::Relaxed);
    }

    /// Returns true if cancellation has been requested.
    pub fn is_cancelled(&self) -> bool {
        self.inner.load(Ordering::Relaxed)
    }
}
