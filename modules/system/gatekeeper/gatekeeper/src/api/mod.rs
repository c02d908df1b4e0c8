//! HTTP surface: axum middleware and response mapping.

pub mod middleware;
pub mod response;
