//! Cooperative cancellation handles for in-flight controller loads.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// A cancellation handle passed into [`Controller::load`](crate::Controller::load).
///
/// Cancellation is cooperative, never preemptive: a well-behaved load polls
/// [`is_cancelled`](Self::is_cancelled) at its own suspension points (between
/// fetch steps, inside pagination loops) and bails out early when the flag is
/// set. A load that ignores the flag still cannot surface a stale result:
/// each token carries the generation of the navigation that issued it, and
/// the container discards completions whose generation has been superseded.
///
/// Tokens are cheap to clone; clones observe the same flag.
#[derive(Debug, Clone)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
    generation: u64,
}

impl CancelToken {
    pub(crate) fn new(generation: u64) -> Self {
        CancelToken {
            cancelled: Arc::new(AtomicBool::new(false)),
            generation,
        }
    }

    /// A token that is never cancelled, for driving a controller by hand
    /// outside a container (typically in tests).
    pub fn detached() -> Self {
        CancelToken::new(0)
    }

    /// Whether the navigation that issued this token has been superseded.
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    pub(crate) fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub(crate) fn generation(&self) -> u64 {
        self.generation
    }
}
