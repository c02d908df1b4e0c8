#![allow(clippy::unwrap_used, clippy::expect_used, dead_code)]

//! Shared fixtures: in-memory collaborators with call counters and a small
//! router whose handler echoes the admitted caller.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::request::Parts;
use axum::http::{Request, Response, StatusCode};
use axum::routing::get;
use axum::{Extension, Json, Router};
use gatekeeper::{AllowList, Gatekeeper, GatekeeperConfig};
use gatekeeper_sdk::{
    AssertionVerifier, BearerTokenVerifier, CallerIdentity, DirectoryClient, DirectoryError,
    SessionGate, VerifierError,
};
use tower::ServiceExt;

pub const LOGIN_URL: &str = "https://sso.example.com/login";
pub const SESSION_HEADER: &str = "x-test-session";

/// Verifier answering from a fixed table; anything else is `Ok(false)`.
#[derive(Default)]
pub struct TableVerifier {
    valid: BTreeSet<String>,
    failure: Option<VerifierError>,
    calls: AtomicUsize,
}

impl TableVerifier {
    pub fn accepting(valid: &[&str]) -> Arc<Self> {
        Arc::new(Self {
            valid: valid.iter().map(|v| (*v).to_owned()).collect(),
            ..Self::default()
        })
    }

    pub fn failing(err: VerifierError) -> Arc<Self> {
        Arc::new(Self {
            failure: Some(err),
            ..Self::default()
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn check(&self, credential: &str) -> Result<bool, VerifierError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.failure {
            Some(err) => Err(err.clone()),
            None => Ok(self.valid.contains(credential)),
        }
    }
}

#[async_trait]
impl BearerTokenVerifier for TableVerifier {
    async fn verify_bearer_token(&self, token: &str) -> Result<bool, VerifierError> {
        self.check(token)
    }
}

#[async_trait]
impl AssertionVerifier for TableVerifier {
    async fn verify_assertion(&self, assertion: &str) -> Result<bool, VerifierError> {
        self.check(assertion)
    }
}

/// Directory backed by a map; a missing user is `UserNotFound`.
#[derive(Default)]
pub struct MapDirectory {
    users: BTreeMap<String, Vec<String>>,
    unavailable: bool,
    calls: AtomicUsize,
}

impl MapDirectory {
    pub fn with_user(username: &str, groups: &[&str]) -> Arc<Self> {
        let mut users = BTreeMap::new();
        users.insert(
            username.to_owned(),
            groups.iter().map(|g| (*g).to_owned()).collect(),
        );
        Arc::new(Self {
            users,
            ..Self::default()
        })
    }

    pub fn unavailable() -> Arc<Self> {
        Arc::new(Self {
            unavailable: true,
            ..Self::default()
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DirectoryClient for MapDirectory {
    async fn groups_for_user(&self, username: &str) -> Result<Vec<String>, DirectoryError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.unavailable {
            return Err(DirectoryError::ServiceUnavailable("ldap timeout".to_owned()));
        }
        self.users
            .get(username)
            .cloned()
            .ok_or_else(|| DirectoryError::UserNotFound {
                username: username.to_owned(),
            })
    }
}

/// Session gate reading the username from a test header.
#[derive(Default)]
pub struct HeaderSessions {
    calls: AtomicUsize,
}

impl HeaderSessions {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SessionGate for HeaderSessions {
    async fn established_session(&self, parts: &Parts) -> Option<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        parts
            .headers
            .get(SESSION_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned)
    }

    fn login_location(&self, _parts: &Parts) -> String {
        LOGIN_URL.to_owned()
    }
}

pub struct Fixture {
    pub bearer: Arc<TableVerifier>,
    pub assertion: Arc<TableVerifier>,
    pub directory: Arc<MapDirectory>,
    pub sessions: Arc<HeaderSessions>,
    pub handler_calls: Arc<AtomicUsize>,
}

impl Fixture {
    pub fn new() -> Self {
        Self {
            bearer: TableVerifier::accepting(&["good-token"]),
            assertion: TableVerifier::accepting(&["good.jwt.assertion"]),
            directory: MapDirectory::with_user("alice", &["staff", "eng"]),
            sessions: HeaderSessions::new(),
            handler_calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn handler_calls(&self) -> usize {
        self.handler_calls.load(Ordering::SeqCst)
    }

    pub fn gatekeeper(&self, local_environment: bool, allow_list: &[&str]) -> Gatekeeper {
        let config = GatekeeperConfig {
            local_environment,
            allow_list: AllowList::new(allow_list.iter().copied()),
            ..GatekeeperConfig::default()
        };
        Gatekeeper::builder(config)
            .bearer_verifier(self.bearer.clone())
            .assertion_verifier(self.assertion.clone())
            .directory(self.directory.clone())
            .session_gate(self.sessions.clone())
            .build()
            .expect("gatekeeper builds")
    }

    /// `/whoami` echoing the `CallerIdentity` extension.
    pub fn routes(&self) -> Router {
        let calls = self.handler_calls.clone();
        Router::new().route(
            "/whoami",
            get(move |Extension(caller): Extension<CallerIdentity>| {
                let calls = calls.clone();
                async move {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Json(caller)
                }
            }),
        )
    }
}

pub fn request(headers: &[(&str, &str)]) -> Request<Body> {
    let mut builder = Request::builder().uri("/whoami");
    for (name, value) in headers {
        builder = builder.header(*name, *value);
    }
    builder.body(Body::empty()).unwrap()
}

pub async fn send(router: &Router, req: Request<Body>) -> Response<Body> {
    router.clone().oneshot(req).await.unwrap()
}

pub async fn body_json(resp: Response<Body>) -> serde_json::Value {
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

pub async fn assert_message(resp: Response<Body>, expected: &str) {
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(resp).await,
        serde_json::json!({ "message": expected })
    );
}
