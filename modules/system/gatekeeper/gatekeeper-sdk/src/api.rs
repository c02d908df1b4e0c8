//! Collaborator traits consumed by the gatekeeper pipeline.
//!
//! The pipeline only depends on the yes/no/error contracts below, so
//! alternate identity providers can be substituted without touching the
//! cascade logic.

use async_trait::async_trait;
use http::request::Parts;

use crate::error::{DirectoryError, VerifierError};

/// Validates an opaque bearer credential against a trusted issuer.
#[async_trait]
pub trait BearerTokenVerifier: Send + Sync {
    /// Verify a bearer token.
    ///
    /// # Arguments
    ///
    /// * `token` - The raw token (without the `Bearer ` prefix)
    ///
    /// Returns `Ok(true)` when the token is valid and `Ok(false)` when it is
    /// well-formed but not accepted.
    ///
    /// # Errors
    ///
    /// Returns [`VerifierError`] when verification itself failed. The error
    /// text is shown to the caller.
    async fn verify_bearer_token(&self, token: &str) -> Result<bool, VerifierError>;
}

/// Validates a signed federated assertion (`X-jwt-assertion` header).
#[async_trait]
pub trait AssertionVerifier: Send + Sync {
    /// Verify a federated assertion.
    ///
    /// Returns `Ok(true)` when the assertion is valid and `Ok(false)` when it
    /// is rejected (bad signature, expired, wrong issuer).
    ///
    /// # Errors
    ///
    /// Returns [`VerifierError`] when the assertion cannot be processed at
    /// all or the verifier failed.
    async fn verify_assertion(&self, assertion: &str) -> Result<bool, VerifierError>;
}

/// Resolves a username to its group memberships.
#[async_trait]
pub trait DirectoryClient: Send + Sync {
    /// Get the groups the user belongs to.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryError`] if the lookup failed. Callers treat any
    /// error as "no groups".
    async fn groups_for_user(&self, username: &str) -> Result<Vec<String>, DirectoryError>;
}

/// Interactive single-sign-on session boundary.
///
/// The session protocol itself (cookies, tickets, storage) lives behind this
/// trait; the gatekeeper only consumes the resolved username.
#[async_trait]
pub trait SessionGate: Send + Sync {
    /// Username of the established interactive session, if any.
    async fn established_session(&self, parts: &Parts) -> Option<String>;

    /// Absolute URL the caller must be redirected to in order to log in.
    fn login_location(&self, parts: &Parts) -> String;
}
