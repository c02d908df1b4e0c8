use std::sync::Arc;

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use gatekeeper_sdk::{CallerIdentity, SessionGate};

use crate::api::response::login_redirect;
use crate::config::AllowList;
use crate::domain::error::AuthError;
use crate::domain::groups::GroupGatekeeper;
use crate::domain::machine::MachineAuthorizer;
use crate::domain::request::AuthRequest;
use crate::domain::verdict::Verdict;

/// Shared state for the machine-only middleware.
#[derive(Clone)]
pub struct MachineAuthState {
    pub machine: Arc<MachineAuthorizer>,
}

/// Shared state for the user-capable middleware.
#[derive(Clone)]
pub struct UserAuthState {
    pub machine: Arc<MachineAuthorizer>,
    pub sessions: Arc<dyn SessionGate>,
    pub groups: Arc<GroupGatekeeper>,
    pub allow_list: Arc<AllowList>,
}

/// Machine-only gatekeeper middleware.
///
/// Admits callers with a machine credential (or in the local environment);
/// everything else is answered with `400` and the handler never runs.
#[tracing::instrument(skip_all, fields(method = %req.method(), path = %req.uri().path()))]
pub async fn authenticate(
    State(state): State<MachineAuthState>,
    mut req: Request,
    next: Next,
) -> Response {
    let auth = AuthRequest::from_headers(req.method(), req.uri().path(), req.headers());

    match state.machine.authorize(&auth).await {
        Verdict::Authorized(method) => {
            req.extensions_mut().insert(CallerIdentity::machine(method));
            next.run(req).await
        }
        Verdict::Error(err) => err.into_response(),
        Verdict::Denied => AuthError::Unauthorized.into_response(),
    }
}

/// User-capable gatekeeper middleware.
///
/// Runs the machine checks first. When no machine credential is present the
/// caller needs an interactive session whose user shares a group with the
/// allow-list; without a session the caller is redirected to log in.
#[tracing::instrument(skip_all, fields(method = %req.method(), path = %req.uri().path()))]
pub async fn authenticate_user(
    State(state): State<UserAuthState>,
    mut req: Request,
    next: Next,
) -> Response {
    let auth = AuthRequest::from_headers(req.method(), req.uri().path(), req.headers());

    match state.machine.authorize(&auth).await {
        Verdict::Authorized(method) => {
            req.extensions_mut().insert(CallerIdentity::machine(method));
            return next.run(req).await;
        }
        Verdict::Error(err) => return err.into_response(),
        Verdict::Denied => {}
    }

    let (mut parts, body) = req.into_parts();

    let Some(username) = state.sessions.established_session(&parts).await else {
        tracing::debug!("No interactive session, redirecting to login");
        return login_redirect(&state.sessions.login_location(&parts));
    };

    if !state.groups.is_authorized(&username, &state.allow_list).await {
        tracing::info!(%username, "User is not in an allowed group");
        return AuthError::Unauthorized.into_response();
    }

    tracing::info!(%username, "Interactive session authorized");
    parts.extensions.insert(CallerIdentity::user(username));
    next.run(Request::from_parts(parts, body)).await
}
