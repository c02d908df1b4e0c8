//! Session cookie lookup and single-sign-on login redirect.

use std::collections::BTreeMap;

use async_trait::async_trait;
use axum_extra::extract::cookie::CookieJar;
use gatekeeper_sdk::SessionGate;
use http::header;
use http::request::Parts;
use url::Url;

use crate::config::SessionConfig;
use crate::error::PluginError;

/// Session gate backed by a fixed session-id to username table.
pub struct CookieSessionGate {
    cookie_name: String,
    login_url: Url,
    service_base_url: Option<Url>,
    sessions: BTreeMap<String, String>,
}

impl CookieSessionGate {
    /// Build from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`PluginError::InvalidUrl`] when `login_url` or
    /// `service_base_url` is not an absolute URL.
    pub fn from_config(cfg: &SessionConfig) -> Result<Self, PluginError> {
        let login_url = Url::parse(&cfg.login_url).map_err(|source| PluginError::InvalidUrl {
            field: "login_url",
            source,
        })?;
        let service_base_url = cfg
            .service_base_url
            .as_deref()
            .map(Url::parse)
            .transpose()
            .map_err(|source| PluginError::InvalidUrl {
                field: "service_base_url",
                source,
            })?;

        Ok(Self {
            cookie_name: cfg.cookie_name.clone(),
            login_url,
            service_base_url,
            sessions: cfg.sessions.clone(),
        })
    }

    /// URL the caller asked for, used as the `service` parameter.
    ///
    /// Scheme, host and path prefix always come from the base; the request
    /// only contributes path and query, so a `//host` path cannot replace
    /// the origin.
    fn service_url(&self, parts: &Parts) -> Option<Url> {
        let (mut service, prefix) = match &self.service_base_url {
            Some(base) => (base.clone(), base.path().trim_end_matches('/').to_owned()),
            None => {
                let host = parts.headers.get(header::HOST)?.to_str().ok()?;
                (Url::parse(&format!("https://{host}")).ok()?, String::new())
            }
        };
        service.set_path(&format!("{prefix}{}", parts.uri.path()));
        service.set_query(parts.uri.query());
        service.set_fragment(None);
        Some(service)
    }
}

#[async_trait]
impl SessionGate for CookieSessionGate {
    async fn established_session(&self, parts: &Parts) -> Option<String> {
        let jar = CookieJar::from_headers(&parts.headers);
        let session_id = jar.get(&self.cookie_name)?;
        self.sessions.get(session_id.value()).cloned()
    }

    fn login_location(&self, parts: &Parts) -> String {
        let mut location = self.login_url.clone();
        if let Some(service) = self.service_url(parts) {
            location
                .query_pairs_mut()
                .append_pair("service", service.as_str());
        }
        location.into()
    }
}
