//! Authentication material extracted from an inbound request.

use http::{HeaderMap, HeaderName, HeaderValue, Method, header};
use secrecy::{ExposeSecret, SecretString};

/// Header carrying the federated JWT assertion.
pub const ASSERTION_HEADER: HeaderName = HeaderName::from_static("x-jwt-assertion");

/// A credential header as received.
#[derive(Debug, Clone)]
pub enum Credential {
    /// Header value readable as visible ASCII.
    Text(SecretString),
    /// Header present but not representable as text.
    Unreadable,
}

impl Credential {
    /// `None` for absent or empty headers.
    fn from_header(value: Option<&HeaderValue>) -> Option<Self> {
        let value = value?;
        if value.is_empty() {
            return None;
        }
        Some(match value.to_str() {
            Ok(text) => Self::Text(SecretString::from(text.to_owned())),
            Err(_) => Self::Unreadable,
        })
    }

    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(secret) => Some(secret.expose_secret()),
            Self::Unreadable => None,
        }
    }
}

/// Per-request authentication material.
///
/// Method and path are routing metadata carried for diagnostics only; the
/// pipeline never decides on them.
#[derive(Debug, Clone)]
pub struct AuthRequest {
    method: Method,
    path: String,
    authorization: Option<Credential>,
    assertion: Option<Credential>,
}

impl AuthRequest {
    /// Request with no credentials.
    #[must_use]
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            authorization: None,
            assertion: None,
        }
    }

    /// Extract credentials from request headers.
    #[must_use]
    pub fn from_headers(method: &Method, path: &str, headers: &HeaderMap) -> Self {
        Self {
            method: method.clone(),
            path: path.to_owned(),
            authorization: Credential::from_header(headers.get(header::AUTHORIZATION)),
            assertion: Credential::from_header(headers.get(&ASSERTION_HEADER)),
        }
    }

    #[must_use]
    pub fn with_authorization(mut self, value: impl Into<String>) -> Self {
        self.authorization = non_empty(value.into());
        self
    }

    #[must_use]
    pub fn with_assertion(mut self, value: impl Into<String>) -> Self {
        self.assertion = non_empty(value.into());
        self
    }

    #[must_use]
    pub fn method(&self) -> &Method {
        &self.method
    }

    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    #[must_use]
    pub fn authorization(&self) -> Option<&Credential> {
        self.authorization.as_ref()
    }

    #[must_use]
    pub fn assertion(&self) -> Option<&Credential> {
        self.assertion.as_ref()
    }
}

fn non_empty(value: String) -> Option<Credential> {
    (!value.is_empty()).then(|| Credential::Text(SecretString::from(value)))
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn extracts_both_headers() {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer xyz"));
        headers.insert(ASSERTION_HEADER, HeaderValue::from_static("a.b.c"));

        let req = AuthRequest::from_headers(&Method::GET, "/rooms", &headers);
        assert_eq!(
            req.authorization().and_then(Credential::as_text),
            Some("Bearer xyz")
        );
        assert_eq!(req.assertion().and_then(Credential::as_text), Some("a.b.c"));
        assert_eq!(req.path(), "/rooms");
    }

    #[test]
    fn empty_header_counts_as_absent() {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static(""));

        let req = AuthRequest::from_headers(&Method::GET, "/", &headers);
        assert!(req.authorization().is_none());
    }

    #[test]
    fn non_ascii_header_is_unreadable() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_bytes(b"Bearer \xff\xfe").unwrap(),
        );

        let req = AuthRequest::from_headers(&Method::GET, "/", &headers);
        assert!(matches!(req.authorization(), Some(Credential::Unreadable)));
    }

    #[test]
    fn debug_output_redacts_credentials() {
        let req = AuthRequest::new(Method::GET, "/").with_authorization("Bearer top-secret");
        let printed = format!("{req:?}");
        assert!(!printed.contains("top-secret"));
    }
}
