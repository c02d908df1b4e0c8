//! Non-interactive checks: local environment, bearer token, federated JWT.

use std::sync::Arc;

use gatekeeper_sdk::{AssertionVerifier, AuthMethod, BearerTokenVerifier};
use tracing::{debug, error, info};

use super::error::AuthError;
use super::request::{AuthRequest, Credential};
use super::verdict::Verdict;

/// Runs the machine-level checks in fixed priority order.
///
/// The first `Authorized` or `Error` wins. When every check is `Denied` the
/// caller has no machine credential and may be escalated to the user flow.
#[derive(Clone)]
pub struct MachineAuthorizer {
    local_environment: bool,
    max_credential_bytes: usize,
    bearer: Arc<dyn BearerTokenVerifier>,
    assertion: Arc<dyn AssertionVerifier>,
}

impl MachineAuthorizer {
    #[must_use]
    pub fn new(
        local_environment: bool,
        max_credential_bytes: usize,
        bearer: Arc<dyn BearerTokenVerifier>,
        assertion: Arc<dyn AssertionVerifier>,
    ) -> Self {
        Self {
            local_environment,
            max_credential_bytes,
            bearer,
            assertion,
        }
    }

    /// Run environment bypass, bearer and assertion checks in order.
    pub async fn authorize(&self, request: &AuthRequest) -> Verdict {
        let verdict = self.check_local();
        if verdict.is_terminal() {
            return verdict;
        }

        let verdict = self.check_bearer_token(request).await;
        if verdict.is_terminal() {
            return verdict;
        }

        self.check_assertion(request).await
    }

    fn check_local(&self) -> Verdict {
        debug!("Local check starting");
        if self.local_environment {
            info!("Authorized via local environment");
            return Verdict::Authorized(AuthMethod::LocalEnvironment);
        }
        debug!("Local check finished");
        Verdict::Denied
    }

    async fn check_bearer_token(&self, request: &AuthRequest) -> Verdict {
        debug!("Bearer token check starting");

        let Some(credential) = request.authorization() else {
            debug!("Bearer token check finished");
            return Verdict::Denied;
        };

        let token = match parse_bearer(credential, self.max_credential_bytes) {
            Ok(token) => token,
            Err(err) => {
                debug!(
                    method = %request.method(),
                    path = %request.path(),
                    "Rejected malformed Authorization header"
                );
                return err.into();
            }
        };

        match self.bearer.verify_bearer_token(token).await {
            Ok(true) => {
                info!("Bearer token authorized");
                Verdict::Authorized(AuthMethod::BearerToken)
            }
            Ok(false) => {
                debug!("Bearer token check finished");
                Verdict::Denied
            }
            Err(err) => {
                error!(error = %err, "Bearer token verifier failed");
                Verdict::Error(err.into())
            }
        }
    }

    async fn check_assertion(&self, request: &AuthRequest) -> Verdict {
        debug!("Federated assertion check starting");

        let Some(credential) = request.assertion() else {
            debug!("Federated assertion check finished");
            return Verdict::Denied;
        };

        let assertion = match credential.as_text() {
            Some(text) if text.len() <= self.max_credential_bytes => text,
            _ => {
                debug!(
                    method = %request.method(),
                    path = %request.path(),
                    "Rejected malformed X-jwt-assertion header"
                );
                return AuthError::malformed_assertion().into();
            }
        };

        match self.assertion.verify_assertion(assertion).await {
            Ok(true) => {
                info!("Federated assertion validated");
                Verdict::Authorized(AuthMethod::FederatedAssertion)
            }
            Ok(false) => {
                debug!("Federated assertion check finished");
                Verdict::Denied
            }
            Err(err) => {
                error!(error = %err, "Invalid federated assertion");
                Verdict::Error(err.into())
            }
        }
    }
}

/// Split `Bearer <token>` into its token.
///
/// Exactly two single-space separated, non-empty parts with a
/// case-insensitive `Bearer` scheme; anything else is malformed.
fn parse_bearer(credential: &Credential, max_bytes: usize) -> Result<&str, AuthError> {
    let header = credential
        .as_text()
        .filter(|h| h.len() <= max_bytes)
        .ok_or_else(AuthError::malformed_authorization)?;

    let mut parts = header.split(' ');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(scheme), Some(token), None)
            if scheme.eq_ignore_ascii_case("bearer") && !token.is_empty() =>
        {
            Ok(token)
        }
        _ => Err(AuthError::malformed_authorization()),
    }
}
