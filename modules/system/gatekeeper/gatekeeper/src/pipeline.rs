//! Assembled gatekeeper: configuration plus collaborators, ready to wrap
//! routers in either mode.

use std::sync::Arc;

use axum::Router;
use axum::middleware::from_fn_with_state;
use gatekeeper_sdk::{AssertionVerifier, BearerTokenVerifier, DirectoryClient, SessionGate};

use crate::api::middleware::{self, MachineAuthState, UserAuthState};
use crate::config::{AllowList, GatekeeperConfig};
use crate::domain::error::ConfigError;
use crate::domain::groups::GroupGatekeeper;
use crate::domain::machine::MachineAuthorizer;

/// Gatekeeper with its configuration and collaborators bound.
///
/// Cheap to clone; all state is shared and read-only.
#[derive(Clone)]
pub struct Gatekeeper {
    machine: Arc<MachineAuthorizer>,
    allow_list: Arc<AllowList>,
    user: Option<UserCollaborators>,
}

#[derive(Clone)]
struct UserCollaborators {
    sessions: Arc<dyn SessionGate>,
    groups: Arc<GroupGatekeeper>,
}

impl Gatekeeper {
    #[must_use]
    pub fn builder(config: GatekeeperConfig) -> GatekeeperBuilder {
        GatekeeperBuilder {
            config,
            bearer: None,
            assertion: None,
            directory: None,
            sessions: None,
        }
    }

    /// True when a directory and a session gate were supplied.
    #[must_use]
    pub fn supports_user_mode(&self) -> bool {
        self.user.is_some()
    }

    /// Wrap every route of `router` in the machine-only middleware.
    ///
    /// Unmatched paths are not gated and keep their `404`.
    #[must_use]
    pub fn authenticate<S>(&self, router: Router<S>) -> Router<S>
    where
        S: Clone + Send + Sync + 'static,
    {
        let state = MachineAuthState {
            machine: Arc::clone(&self.machine),
        };
        router.route_layer(from_fn_with_state(state, middleware::authenticate))
    }

    /// Wrap every route of `router` in the user-capable middleware.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UserModeUnavailable`] when the gatekeeper was
    /// built without a directory or session gate.
    pub fn authenticate_user<S>(&self, router: Router<S>) -> Result<Router<S>, ConfigError>
    where
        S: Clone + Send + Sync + 'static,
    {
        let user = self.user.as_ref().ok_or(ConfigError::UserModeUnavailable)?;
        let state = UserAuthState {
            machine: Arc::clone(&self.machine),
            sessions: Arc::clone(&user.sessions),
            groups: Arc::clone(&user.groups),
            allow_list: Arc::clone(&self.allow_list),
        };
        Ok(router.route_layer(from_fn_with_state(state, middleware::authenticate_user)))
    }
}

/// Builder for [`Gatekeeper`].
#[must_use]
pub struct GatekeeperBuilder {
    config: GatekeeperConfig,
    bearer: Option<Arc<dyn BearerTokenVerifier>>,
    assertion: Option<Arc<dyn AssertionVerifier>>,
    directory: Option<Arc<dyn DirectoryClient>>,
    sessions: Option<Arc<dyn SessionGate>>,
}

impl GatekeeperBuilder {
    pub fn bearer_verifier(mut self, verifier: Arc<dyn BearerTokenVerifier>) -> Self {
        self.bearer = Some(verifier);
        self
    }

    pub fn assertion_verifier(mut self, verifier: Arc<dyn AssertionVerifier>) -> Self {
        self.assertion = Some(verifier);
        self
    }

    pub fn directory(mut self, directory: Arc<dyn DirectoryClient>) -> Self {
        self.directory = Some(directory);
        self
    }

    pub fn session_gate(mut self, sessions: Arc<dyn SessionGate>) -> Self {
        self.sessions = Some(sessions);
        self
    }

    /// Bind the collaborators.
    ///
    /// Directory and session gate are optional together; without them only
    /// machine mode is available.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a verifier is missing, or when exactly
    /// one of directory and session gate was supplied.
    pub fn build(self) -> Result<Gatekeeper, ConfigError> {
        let bearer = self.bearer.ok_or(ConfigError::MissingBearerVerifier)?;
        let assertion = self
            .assertion
            .ok_or(ConfigError::MissingAssertionVerifier)?;

        let user = match (self.directory, self.sessions) {
            (Some(directory), Some(sessions)) => Some(UserCollaborators {
                sessions,
                groups: Arc::new(GroupGatekeeper::new(directory)),
            }),
            (None, None) => None,
            _ => return Err(ConfigError::UserModeUnavailable),
        };

        if self.config.local_environment {
            tracing::warn!(
                "Gatekeeper local environment mode is ENABLED: every request is authorized \
                 without checking credentials. DO NOT use this mode outside development."
            );
        }
        if user.is_some() && self.config.allow_list.is_empty() {
            tracing::warn!("Allow-list is empty: no interactive user will be admitted");
        }

        tracing::info!(
            local_environment = self.config.local_environment,
            allowed_groups = self.config.allow_list.len(),
            user_mode = user.is_some(),
            "Gatekeeper initialized"
        );

        Ok(Gatekeeper {
            machine: Arc::new(MachineAuthorizer::new(
                self.config.local_environment,
                self.config.max_credential_bytes,
                bearer,
                assertion,
            )),
            allow_list: Arc::new(self.config.allow_list),
            user,
        })
    }
}
