use std::sync::Arc;

use gatekeeper_sdk::{AssertionVerifier, BearerTokenVerifier, DirectoryClient, SessionGate};
use tracing::{info, warn};

use crate::config::StaticGatekeeperPluginConfig;
use crate::domain::{CookieSessionGate, JwtAssertionVerifier, StaticBearerTokens, StaticDirectory};
use crate::error::PluginError;

/// Static gatekeeper plugin.
///
/// Owns one instance of each collaborator and hands them out as trait
/// objects for the gatekeeper builder.
pub struct StaticGatekeeperPlugin {
    bearer: Arc<StaticBearerTokens>,
    assertion: Arc<JwtAssertionVerifier>,
    directory: Arc<StaticDirectory>,
    sessions: Arc<CookieSessionGate>,
}

impl StaticGatekeeperPlugin {
    /// Build every collaborator from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`PluginError`] for unparsable key material or URLs.
    pub fn from_config(cfg: &StaticGatekeeperPluginConfig) -> Result<Self, PluginError> {
        let bearer = StaticBearerTokens::new(&cfg.bearer_tokens);
        let assertion = JwtAssertionVerifier::from_config(&cfg.assertion)?;
        let sessions = CookieSessionGate::from_config(&cfg.sessions)?;
        let directory = StaticDirectory::new(cfg.directory.users.clone());

        if !cfg.sessions.sessions.is_empty() {
            warn!(
                "Static gatekeeper plugin serves a fixed session table; \
                 do NOT use it in production"
            );
        }

        info!(
            bearer_tokens = bearer.len(),
            assertion_enabled = assertion.is_enabled(),
            directory_users = cfg.directory.users.len(),
            sessions = cfg.sessions.sessions.len(),
            "Static gatekeeper plugin initialized"
        );

        Ok(Self {
            bearer: Arc::new(bearer),
            assertion: Arc::new(assertion),
            directory: Arc::new(directory),
            sessions: Arc::new(sessions),
        })
    }

    #[must_use]
    pub fn bearer_verifier(&self) -> Arc<dyn BearerTokenVerifier> {
        self.bearer.clone()
    }

    #[must_use]
    pub fn assertion_verifier(&self) -> Arc<dyn AssertionVerifier> {
        self.assertion.clone()
    }

    #[must_use]
    pub fn directory(&self) -> Arc<dyn DirectoryClient> {
        self.directory.clone()
    }

    #[must_use]
    pub fn session_gate(&self) -> Arc<dyn SessionGate> {
        self.sessions.clone()
    }
}
