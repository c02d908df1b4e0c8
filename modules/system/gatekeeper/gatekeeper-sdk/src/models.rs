//! Models shared between the gatekeeper and the handlers it protects.

use serde::{Deserialize, Serialize};

/// The strategy that admitted a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthMethod {
    /// Trusted local environment; no credential was checked.
    LocalEnvironment,
    /// Valid `Authorization: Bearer` token.
    BearerToken,
    /// Valid federated `X-jwt-assertion`.
    FederatedAssertion,
    /// Interactive session whose user is in an allowed group.
    InteractiveSession,
}

impl AuthMethod {
    /// Stable label for logs.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::LocalEnvironment => "local_environment",
            Self::BearerToken => "bearer_token",
            Self::FederatedAssertion => "federated_assertion",
            Self::InteractiveSession => "interactive_session",
        }
    }
}

/// Identity of an admitted caller.
///
/// Inserted into the request extensions by the gatekeeper middleware before
/// the downstream handler runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallerIdentity {
    method: AuthMethod,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    username: Option<String>,
}

impl CallerIdentity {
    /// Caller admitted by a non-interactive check.
    #[must_use]
    pub fn machine(method: AuthMethod) -> Self {
        Self {
            method,
            username: None,
        }
    }

    /// Caller admitted through an interactive session.
    #[must_use]
    pub fn user(username: impl Into<String>) -> Self {
        Self {
            method: AuthMethod::InteractiveSession,
            username: Some(username.into()),
        }
    }

    #[must_use]
    pub fn method(&self) -> AuthMethod {
        self.method
    }

    /// Session username; `None` for machine callers.
    #[must_use]
    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    #[must_use]
    pub fn is_user(&self) -> bool {
        self.username.is_some()
    }
}
