use crate::authenticator::SharedAuthenticator;
use crate::cancellation::CancellationToken;
use crate::task::{AuthResult, AuthTask};
use crate::worker::SerialWorker;

/// The authentication bridge façade.
///
/// Owns one serial worker and a shared reference to the external
/// authenticator. Requests submitted from any thread are copied
/// into tasks and executed strictly one at a time, in submission order, on
/// the worker thread.
pub struct AuthenticationService {
    worker: SerialWorker,
    active: bool,
}

impl AuthenticationService {
    /// Start a service with exactly one dedicated worker.
    ///
    /// Call [`crate::initialize`] once per process before constructing
    /// services.
    pub fn new(authenticator: SharedAuthenticator) -> Self {
        tracing::debug!("starting authentication service");

        Self {
            worker: SerialWorker::new(authenticator),
            active: true,
        }
    }

    /// Submit `token` for authentication.
    ///
    /// The token is copied before this call returns; the caller may reuse or
    /// drop its buffer immediately. `on_complete` is invoked exactly once,
    /// eventually, on the worker thread — not necessarily the calling
    /// thread — with the session info or the error; extract it with
    /// [`AuthResult::finish`]. Does not block: if the authenticator is slow,
    /// the request simply waits its turn in the queue.
    ///
    /// `cancellation` is accepted and stored but never polled: a queued
    /// request always runs to completion. See [`CancellationToken`].
    ///
    /// Submitting to a service that has been shut down is a caller error;
    /// the request is dropped and its handler never fires.
    pub fn authenticate(
        &self,
        token: &str,
        cancellation: Option<CancellationToken>,
        on_complete: impl FnOnce(AuthResult) + Send + 'static,
    ) {
        let task = AuthTask::new(token.to_owned(), cancellation, Box::new(on_complete));

        if self.worker.submit(task) {
            tracing::debug!("queued authentication request");
        } else {
            tracing::error!("authentication request submitted after shutdown; dropping it");
            debug_assert!(false, "authenticate called after shutdown");
        }
    }

    /// Shut down the service. Idempotent.
    ///
    /// Stops accepting new submissions and releases the worker queue without
    /// waiting: tasks already queued or running finish in the background and
    /// their completion handlers still fire. Dropping the service performs
    /// the same release.
    pub fn shutdown(&mut self) {
        if !self.active {
            return;
        }
        self.active = false;

        tracing::debug!("shutting down authentication service");
        self.worker.release();
    }
}

impl Drop for AuthenticationService {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[cfg(test)]
mod test {
    use std::sync::{mpsc, Arc};

    use parking_lot::Mutex;

    use super::AuthenticationService;
    use crate::authenticator::SharedAuthenticator;
    use crate::cancellation::CancellationToken;
    use crate::error::AuthError;

    #[test]
    fn finish_returns_the_session_info() {
        let authenticator: SharedAuthenticator = Arc::new(|token: &str| {
            assert_eq!(token, "tok-A");
            Some("SESSION-A".to_string())
        });
        let mut service = AuthenticationService::new(authenticator);

        let (tx, rx) = mpsc::channel();
        service.authenticate("tok-A", None, move |result| {
            tx.send(result.finish()).unwrap();
        });

        assert_eq!(rx.recv().unwrap(), Ok("SESSION-A".to_string()));
        service.shutdown();
    }

    #[test]
    fn finish_surfaces_an_internal_error() {
        let authenticator: SharedAuthenticator = Arc::new(|_: &str| None);
        let mut service = AuthenticationService::new(authenticator);

        let (tx, rx) = mpsc::channel();
        service.authenticate("tok-B", None, move |result| {
            tx.send(result.finish()).unwrap();
        });

        assert_eq!(rx.recv().unwrap(), Err(AuthError::Internal));
        service.shutdown();
    }

    #[test]
    fn token_is_copied_at_submission() {
        let seen: Arc<Mutex<Vec<String>>> = Default::default();
        let seen2 = Arc::clone(&seen);
        let authenticator: SharedAuthenticator = Arc::new(move |token: &str| {
            seen2.lock().push(token.to_string());
            Some("s".to_string())
        });
        let mut service = AuthenticationService::new(authenticator);

        let (tx, rx) = mpsc::channel();
        let mut buffer = String::from("tok-original");
        service.authenticate(&buffer, None, move |result| {
            tx.send(result.finish()).unwrap();
        });

        // Clobber and free the caller's buffer before the task runs.
        buffer.clear();
        buffer.push_str("tok-clobbered");
        drop(buffer);

        rx.recv().unwrap().unwrap();
        assert_eq!(*seen.lock(), vec!["tok-original".to_string()]);
        service.shutdown();
    }

    #[test]
    fn cancelled_request_still_runs_to_completion() {
        let authenticator: SharedAuthenticator =
            Arc::new(|token: &str| Some(format!("S-{token}")));
        let mut service = AuthenticationService::new(authenticator);

        let cancellation = CancellationToken::new();
        cancellation.cancel();

        let (tx, rx) = mpsc::channel();
        service.authenticate("tok", Some(cancellation), move |result| {
            tx.send(result.finish()).unwrap();
        });

        assert_eq!(rx.recv().unwrap(), Ok("S-tok".to_string()));
        service.shutdown();
    }

    #[test]
    fn shutdown_is_idempotent() {
        let authenticator: SharedAuthenticator = Arc::new(|_: &str| None);
        let mut service = AuthenticationService::new(authenticator);

        service.shutdown();
        service.shutdown();
    }

    #[test]
    fn dropping_the_service_releases_queued_work() {
        let authenticator: SharedAuthenticator =
            Arc::new(|token: &str| Some(format!("S-{token}")));
        let service = AuthenticationService::new(authenticator);

        let (tx, rx) = mpsc::channel();
        for i in 0..3 {
            let tx = tx.clone();
            service.authenticate(&format!("t{i}"), None, move |result| {
                tx.send(result.finish().unwrap()).unwrap();
            });
        }
        drop(tx);
        drop(service);

        let completions: Vec<_> = rx.iter().collect();
        let expected: Vec<_> = (0..3).map(|i| format!("S-t{i}")).collect();
        assert_eq!(completions, expected);
    }
}
