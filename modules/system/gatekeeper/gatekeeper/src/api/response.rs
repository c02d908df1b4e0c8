use axum::Json;
use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use crate::domain::error::AuthError;

/// JSON body of every gatekeeper rejection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageBody {
    pub message: String,
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        (
            StatusCode::BAD_REQUEST,
            Json(MessageBody {
                message: self.to_string(),
            }),
        )
            .into_response()
    }
}

/// `302 Found` pointing at the login page.
///
/// A location that is not a valid header value cannot be sent; the caller
/// gets `400 Not authorized` instead.
pub(crate) fn login_redirect(location: &str) -> Response {
    match HeaderValue::from_str(location) {
        Ok(value) => (StatusCode::FOUND, [(header::LOCATION, value)]).into_response(),
        Err(err) => {
            tracing::error!(error = %err, "Login location is not a valid header value");
            AuthError::Unauthorized.into_response()
        }
    }
}
