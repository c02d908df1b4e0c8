use axum::routing::get;
use axum::{Extension, Json, Router};
use gatekeeper::Gatekeeper;
use gatekeeper_sdk::CallerIdentity;
use serde_json::{Value, json};
use static_gatekeeper_plugin::StaticGatekeeperPlugin;
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;

/// Build the gatekeeper from configuration and the static plugin.
///
/// # Errors
///
/// Returns an error if the plugin configuration is invalid.
pub fn build_gatekeeper(cfg: &ServerConfig) -> anyhow::Result<Gatekeeper> {
    let plugin = StaticGatekeeperPlugin::from_config(&cfg.static_plugin)?;
    let gatekeeper = Gatekeeper::builder(cfg.gatekeeper.clone())
        .bearer_verifier(plugin.bearer_verifier())
        .assertion_verifier(plugin.assertion_verifier())
        .directory(plugin.directory())
        .session_gate(plugin.session_gate())
        .build()?;
    Ok(gatekeeper)
}

/// Mount the demo routes.
///
/// # Errors
///
/// Returns an error if the gatekeeper cannot serve user-level routes.
pub fn build_router(gatekeeper: &Gatekeeper) -> anyhow::Result<Router> {
    let machine = gatekeeper.authenticate(Router::new().route("/machine/whoami", get(whoami)));
    let user = gatekeeper.authenticate_user(Router::new().route("/user/whoami", get(whoami)))?;

    Ok(Router::new()
        .route("/healthz", get(healthz))
        .merge(machine)
        .merge(user)
        .layer(TraceLayer::new_for_http()))
}

async fn healthz() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

async fn whoami(Extension(caller): Extension<CallerIdentity>) -> Json<CallerIdentity> {
    Json(caller)
}
