//! Error types for the gatekeeper pipeline.

use gatekeeper_sdk::VerifierError;
use thiserror::Error;

/// Reason a request was not admitted.
///
/// Every variant is answered with `400 Bad Request` and the display text as
/// the JSON `message`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// A credential header is present but structurally invalid.
    #[error("Bad {header} header")]
    MalformedCredential { header: &'static str },

    /// The bearer or assertion verifier itself failed.
    #[error(transparent)]
    VerifierFailure(#[from] VerifierError),

    /// All checks completed cleanly and none matched.
    #[error("Not authorized")]
    Unauthorized,
}

impl AuthError {
    pub(crate) fn malformed_authorization() -> Self {
        Self::MalformedCredential {
            header: "Authorization",
        }
    }

    pub(crate) fn malformed_assertion() -> Self {
        Self::MalformedCredential {
            header: "X-jwt-assertion",
        }
    }
}

/// Errors assembling the pipeline.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("no bearer token verifier configured")]
    MissingBearerVerifier,

    #[error("no assertion verifier configured")]
    MissingAssertionVerifier,

    #[error("user-level access requires a directory client and a session gate")]
    UserModeUnavailable,
}
