#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
//! Gatekeeper SDK
//!
//! This crate provides the public contracts of the gatekeeper:
//!
//! - [`BearerTokenVerifier`] - validates an opaque bearer credential
//! - [`AssertionVerifier`] - validates a federated JWT assertion
//! - [`DirectoryClient`] - resolves a username to its group memberships
//! - [`SessionGate`] - interactive session lookup and login redirect
//! - [`CallerIdentity`] - who was admitted, inserted into request extensions
//! - [`VerifierError`], [`DirectoryError`] - collaborator error types
//!
//! ## Usage
//!
//! Handlers behind the gatekeeper middleware read the admitted caller from
//! the request extensions:
//!
//! ```ignore
//! use axum::Extension;
//! use gatekeeper_sdk::CallerIdentity;
//!
//! async fn handler(Extension(caller): Extension<CallerIdentity>) -> String {
//!     caller.username().unwrap_or("machine").to_owned()
//! }
//! ```

pub mod api;
pub mod error;
pub mod models;

// Re-export main types at crate root
pub use api::{AssertionVerifier, BearerTokenVerifier, DirectoryClient, SessionGate};
pub use error::{DirectoryError, VerifierError};
pub use models::{AuthMethod, CallerIdentity};
