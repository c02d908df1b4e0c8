//! Configuration for the static gatekeeper plugin.

use std::collections::BTreeMap;
use std::fmt;

use serde::Deserialize;

/// Plugin configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StaticGatekeeperPluginConfig {
    /// Bearer tokens accepted verbatim.
    pub bearer_tokens: Vec<String>,

    /// Federated assertion verification.
    pub assertion: AssertionConfig,

    /// Group memberships per username.
    pub directory: DirectoryConfig,

    /// Interactive session table and login redirect.
    pub sessions: SessionConfig,
}

/// Signing algorithm of federated assertions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssertionAlgorithm {
    /// RSA signature, verified with `public_key_pem`.
    #[default]
    Rs256,
    /// HMAC signature, verified with `shared_secret`.
    Hs256,
}

/// Assertion verifier settings.
///
/// Without key material for the selected algorithm no assertion is ever
/// accepted.
#[derive(Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AssertionConfig {
    pub algorithm: AssertionAlgorithm,

    /// PEM encoded RSA public key (`rs256`).
    pub public_key_pem: Option<String>,

    /// Shared HMAC secret (`hs256`).
    pub shared_secret: Option<String>,

    /// Required `iss` claim.
    pub issuer: Option<String>,

    /// Required `aud` claim. When unset the audience is not checked.
    pub audience: Option<String>,

    /// Clock skew tolerated on `exp` and `nbf`.
    pub leeway_seconds: u64,
}

impl Default for AssertionConfig {
    fn default() -> Self {
        Self {
            algorithm: AssertionAlgorithm::default(),
            public_key_pem: None,
            shared_secret: None,
            issuer: None,
            audience: None,
            leeway_seconds: 60,
        }
    }
}

impl fmt::Debug for AssertionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AssertionConfig")
            .field("algorithm", &self.algorithm)
            .field("public_key_pem", &self.public_key_pem.as_ref().map(|_| "<pem>"))
            .field("shared_secret", &self.shared_secret.as_ref().map(|_| "[REDACTED]"))
            .field("issuer", &self.issuer)
            .field("audience", &self.audience)
            .field("leeway_seconds", &self.leeway_seconds)
            .finish()
    }
}

/// Static directory contents.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DirectoryConfig {
    pub users: BTreeMap<String, Vec<String>>,
}

/// Session cookie table and login redirect target.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SessionConfig {
    /// Cookie carrying the session id.
    pub cookie_name: String,

    /// Login page callers without a session are sent to.
    pub login_url: String,

    /// Public base URL of this service, used to build the `service`
    /// parameter. Falls back to `https://<Host>` when unset.
    pub service_base_url: Option<String>,

    /// Session id to username.
    pub sessions: BTreeMap<String, String>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            cookie_name: "gatekeeper_session".to_owned(),
            login_url: "https://sso.example.com/cas/login".to_owned(),
            service_base_url: None,
            sessions: BTreeMap::new(),
        }
    }
}
