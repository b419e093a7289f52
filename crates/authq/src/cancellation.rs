use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

/// A handle a caller may attach to a request to signal that it no longer
/// cares about the outcome.
///
/// The worker never polls the handle: a request that has been queued always
/// runs to completion and its completion handler still fires. The token
/// gives the interface its shape and marks the extension point for real
/// pre-emption.
#[derive(Clone, Debug, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark the request as abandoned by the caller.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}
