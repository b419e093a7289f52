//! An asynchronous authentication bridge.
//!
//! Accepts opaque credential tokens, serializes the checks through a single
//! dedicated worker per service, delegates the credential check itself to an
//! external [`Authenticate`] collaborator, and delivers each outcome through
//! an exactly-once completion handler.
//!
//! ```
//! use std::sync::Arc;
//! use authq::{AuthenticationService, SharedAuthenticator};
//!
//! authq::initialize();
//!
//! let authenticator: SharedAuthenticator =
//!     Arc::new(|token: &str| Some(format!("session-for-{token}")));
//! let mut service = AuthenticationService::new(authenticator);
//!
//! let (tx, rx) = std::sync::mpsc::channel();
//! service.authenticate("secret-token", None, move |result| {
//!     tx.send(result.finish()).unwrap();
//! });
//!
//! assert_eq!(rx.recv().unwrap().unwrap(), "session-for-secret-token");
//! service.shutdown();
//! ```

pub mod authenticator;
pub mod cancellation;
pub mod error;
pub mod service;
pub mod task;
mod worker;

pub use authenticator::{Authenticate, SharedAuthenticator};
pub use cancellation::CancellationToken;
pub use error::AuthError;
pub use service::AuthenticationService;
pub use task::{AuthResult, CompletionHandler};

use std::sync::atomic::{AtomicBool, Ordering};

static INITIALIZED: AtomicBool = AtomicBool::new(false);

/// Process-wide initialization. The embedding application must call this once
/// before constructing any [`AuthenticationService`]; later calls are no-ops.
///
/// Installs the global `tracing` subscriber, with the filter read from the
/// `AUTHQ_LOG` environment variable. If another component in the process
/// already installed a subscriber, that one is left in place.
pub fn initialize() {
    if INITIALIZED.swap(true, Ordering::SeqCst) {
        return;
    }

    let filter = tracing_subscriber::EnvFilter::try_from_env("AUTHQ_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
