#![allow(clippy::unwrap_used, clippy::expect_used)]

//! User-capable middleware: machine checks, then session and group gate.

mod common;

use axum::Router;
use axum::http::{StatusCode, header};
use common::{
    Fixture, LOGIN_URL, MapDirectory, SESSION_HEADER, TableVerifier, assert_message, body_json,
    request, send,
};
use gatekeeper_sdk::VerifierError;

fn user_router(fx: &Fixture, allow_list: &[&str]) -> Router {
    fx.gatekeeper(false, allow_list)
        .authenticate_user(fx.routes())
        .unwrap()
}

#[tokio::test]
async fn missing_session_redirects_to_login() {
    let fx = Fixture::new();
    let router = user_router(&fx, &["staff"]);

    let resp = send(&router, request(&[])).await;

    assert_eq!(resp.status(), StatusCode::FOUND);
    assert_eq!(resp.headers().get(header::LOCATION).unwrap(), LOGIN_URL);
    assert_eq!(fx.directory.calls(), 0);
    assert_eq!(fx.handler_calls(), 0);
}

#[tokio::test]
async fn rejected_machine_credentials_still_redirect() {
    let fx = Fixture::new();
    let router = user_router(&fx, &["staff"]);

    let resp = send(
        &router,
        request(&[
            ("authorization", "Bearer stale-token"),
            ("x-jwt-assertion", "expired.jwt.assertion"),
        ]),
    )
    .await;

    assert_eq!(resp.status(), StatusCode::FOUND);
    assert_eq!(fx.sessions.calls(), 1);
}

#[tokio::test]
async fn session_user_in_allowed_group_reaches_handler() {
    let fx = Fixture {
        directory: MapDirectory::with_user("jdoe", &["staff", "alumni"]),
        ..Fixture::new()
    };
    let router = user_router(&fx, &["admins", "staff"]);

    let resp = send(&router, request(&[(SESSION_HEADER, "jdoe")])).await;

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        body_json(resp).await,
        serde_json::json!({"method": "interactive_session", "username": "jdoe"})
    );
    assert_eq!(fx.directory.calls(), 1);
}

#[tokio::test]
async fn session_user_outside_allowed_groups_is_not_authorized() {
    let fx = Fixture {
        directory: MapDirectory::with_user("jdoe", &["students"]),
        ..Fixture::new()
    };
    let router = user_router(&fx, &["admins", "staff"]);

    let resp = send(&router, request(&[(SESSION_HEADER, "jdoe")])).await;

    assert_message(resp, "Not authorized").await;
    assert_eq!(fx.handler_calls(), 0);
}

#[tokio::test]
async fn directory_failure_is_not_authorized() {
    let fx = Fixture {
        directory: MapDirectory::unavailable(),
        ..Fixture::new()
    };
    let router = user_router(&fx, &["staff"]);

    let resp = send(&router, request(&[(SESSION_HEADER, "alice")])).await;

    assert_message(resp, "Not authorized").await;
    assert_eq!(fx.handler_calls(), 0);
}

#[tokio::test]
async fn unknown_directory_user_is_not_authorized() {
    let fx = Fixture::new();
    let router = user_router(&fx, &["staff"]);

    let resp = send(&router, request(&[(SESSION_HEADER, "mallory")])).await;

    assert_message(resp, "Not authorized").await;
}

#[tokio::test]
async fn empty_allow_list_admits_no_user() {
    let fx = Fixture::new();
    let router = user_router(&fx, &[]);

    let resp = send(&router, request(&[(SESSION_HEADER, "alice")])).await;

    assert_message(resp, "Not authorized").await;
}

#[tokio::test]
async fn machine_credential_skips_session_lookup() {
    let fx = Fixture::new();
    let router = user_router(&fx, &["staff"]);

    let resp = send(&router, request(&[("authorization", "Bearer good-token")])).await;

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        body_json(resp).await,
        serde_json::json!({"method": "bearer_token"})
    );
    assert_eq!(fx.sessions.calls(), 0);
}

#[tokio::test]
async fn malformed_header_does_not_fall_back_to_session() {
    let fx = Fixture::new();
    let router = user_router(&fx, &["staff"]);

    let resp = send(
        &router,
        request(&[("authorization", "Bearer"), (SESSION_HEADER, "alice")]),
    )
    .await;

    assert_message(resp, "Bad Authorization header").await;
    assert_eq!(fx.sessions.calls(), 0);
    assert_eq!(fx.directory.calls(), 0);
}

#[tokio::test]
async fn verifier_failure_does_not_fall_back_to_session() {
    let fx = Fixture {
        assertion: TableVerifier::failing(VerifierError::Internal("key store locked".to_owned())),
        ..Fixture::new()
    };
    let router = user_router(&fx, &["staff"]);

    let resp = send(
        &router,
        request(&[("x-jwt-assertion", "a.b.c"), (SESSION_HEADER, "alice")]),
    )
    .await;

    assert_message(resp, "internal error: key store locked").await;
    assert_eq!(fx.sessions.calls(), 0);
}

#[tokio::test]
async fn local_environment_admits_without_session() {
    let fx = Fixture::new();
    let router = fx
        .gatekeeper(true, &["staff"])
        .authenticate_user(fx.routes())
        .unwrap();

    let resp = send(&router, request(&[])).await;

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(fx.sessions.calls(), 0);
}
