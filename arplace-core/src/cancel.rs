//! Session-scoped cancellation

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// A cancellation token shared between a session and the async work it
/// starts. Completions holding a cancelled token must be dropped.
#[derive(Debug, Clone)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self {
            cancelled: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

impl Default for CancellationToken {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_state() {
        let token = CancellationToken::new();
        let held_by_task = token.clone();
        assert!(!held_by_task.is_cancelled());

        token.cancel();
        assert!(held_by_task.is_cancelled());
    }

    #[test]
    fn test_fresh_tokens_are_independent() {
        let first = CancellationToken::new();
        let second = CancellationToken::new();
        first.cancel();
        assert!(!second.is_cancelled());
    }
}
