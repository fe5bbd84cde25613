use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::errors::GitdepsError;

/// Cancellation token shared across a resolution run.
///
/// Cloned into every git operation; checked between traversal steps so a
/// ctrl-c aborts the run at the next step boundary instead of hanging.
#[derive(Clone, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Signal cancellation.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    /// Return `Err(Cancelled)` if cancellation has been signalled.
    pub fn check(&self) -> Result<(), GitdepsError> {
        if self.is_cancelled() {
            Err(GitdepsError::Cancelled)
        } else {
            Ok(())
        }
    }
}
