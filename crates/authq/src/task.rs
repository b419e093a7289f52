use crate::authenticator::Authenticate;
use crate::cancellation::CancellationToken;
use crate::error::AuthError;

/// Callback invoked with the outcome of an authentication request.
///
/// Fires exactly once per request, on the worker thread — not necessarily
/// the thread that submitted the request.
pub type CompletionHandler = Box<dyn FnOnce(AuthResult) + Send + 'static>;

/// The completed outcome of an authentication request, as handed to its
/// [`CompletionHandler`].
#[derive(Debug)]
pub struct AuthResult {
    outcome: Result<String, AuthError>,
}

impl AuthResult {
    /// Extract the session info, or [`AuthError::Internal`] if the
    /// authenticator produced none. Consumes the result, so an outcome can
    /// be finished at most once.
    pub fn finish(self) -> Result<String, AuthError> {
        self.outcome
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum TaskState {
    Pending,
    Running,
    Completed,
}

/// One in-flight authentication request: the token copy, the caller's
/// cancellation handle, and the completion handler.
pub(crate) struct AuthTask {
    token: String,
    /// Accepted and stored, never polled; see [`CancellationToken`].
    cancellation: Option<CancellationToken>,
    state: TaskState,
    on_complete: Option<CompletionHandler>,
}

impl AuthTask {
    pub(crate) fn new(
        token: String,
        cancellation: Option<CancellationToken>,
        on_complete: CompletionHandler,
    ) -> Self {
        Self {
            token,
            cancellation,
            state: TaskState::Pending,
            on_complete: Some(on_complete),
        }
    }

    /// Run the task to completion on the worker thread.
    ///
    /// Consumes the task, so no task is ever re-entered or re-run.
    pub(crate) fn run(mut self, authenticator: &dyn Authenticate) {
        debug_assert_eq!(self.state, TaskState::Pending);
        self.state = TaskState::Running;

        tracing::debug!(
            cancelled = self.cancellation.as_ref().map(CancellationToken::is_cancelled),
            "running authentication task"
        );

        let outcome = match authenticator.authenticate(&self.token) {
            Some(session_info) => Ok(session_info),
            None => Err(AuthError::Internal),
        };

        self.complete(outcome);
    }

    /// Record the outcome and fire the completion handler.
    fn complete(mut self, outcome: Result<String, AuthError>) {
        assert_ne!(
            self.state,
            TaskState::Completed,
            "illegal state - task completed twice"
        );
        self.state = TaskState::Completed;

        let on_complete = self
            .on_complete
            .take()
            .expect("illegal state - completion handler already consumed");

        tracing::debug!(ok = outcome.is_ok(), "authentication task completed");

        on_complete(AuthResult { outcome });
    }
}
