//! Error types for gatekeeper collaborators.

use thiserror::Error;

/// Errors reported by a bearer token or assertion verifier.
///
/// These are hard failures: the pipeline stops and the message is returned
/// to the caller. A token that is merely not accepted is `Ok(false)`, not an
/// error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VerifierError {
    /// The credential could not be parsed.
    #[error("malformed credential: {0}")]
    Malformed(String),

    /// The issuer or key source could not be reached.
    #[error("verifier unavailable: {0}")]
    ServiceUnavailable(String),

    /// An internal error occurred.
    #[error("internal error: {0}")]
    Internal(String),
}

/// Errors reported by a directory lookup.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DirectoryError {
    /// The directory has no entry for the user.
    #[error("user '{username}' not found")]
    UserNotFound { username: String },

    /// The directory service could not be reached.
    #[error("directory unavailable: {0}")]
    ServiceUnavailable(String),

    /// An internal error occurred.
    #[error("internal error: {0}")]
    Internal(String),
}
