use thiserror::Error;

/// Failure of an authentication request.
///
/// The bridge distinguishes only one failure mode: the external authenticator
/// produced no session info for the submitted token. Deeper reasons (bad
/// credentials vs. backend failure) are not modeled at this layer; an
/// authenticator that needs to convey them must encode them into the session
/// info it returns. There are no retries here — a fresh submission is the
/// caller's retry mechanism.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum AuthError {
    /// The authenticator returned no session info.
    #[error("Internal error")]
    Internal,
}
