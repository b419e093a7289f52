use std::sync::Arc;

/// The external credential checker the bridge delegates to.
///
/// Called synchronously and serially from a service's dedicated worker
/// thread, never from the submitting thread. Returns the session info of the
/// established session, or `None` when no session could be produced.
///
/// The token reference is valid only for the duration of the call; the bridge
/// keeps its own copy, so implementations need not copy defensively but must
/// not retain the reference.
pub trait Authenticate: Send + Sync {
    fn authenticate(&self, token: &str) -> Option<String>;
}

impl<F> Authenticate for F
where
    F: Fn(&str) -> Option<String> + Send + Sync,
{
    fn authenticate(&self, token: &str) -> Option<String> {
        self(token)
    }
}

/// An authenticator shared with a service. Shared, not owned: the embedding
/// application controls its lifetime and may hand the same authenticator to
/// several services.
pub type SharedAuthenticator = Arc<dyn Authenticate>;
