#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
//! Static Gatekeeper Plugin
//!
//! Collaborators for the gatekeeper that are fully driven by configuration.
//! Intended for development, demos and end-to-end tests.
//!
//! - bearer tokens: a fixed list of accepted tokens
//! - federated assertions: JWT signature, expiry and issuer check against a
//!   configured RS256 public key or HS256 shared secret
//! - directory: a username to groups table
//! - sessions: a session-cookie to username table, with a login redirect
//!   carrying the requested URL as the `service` parameter
//!
//! ## Configuration
//!
//! ```yaml
//! static_plugin:
//!   bearer_tokens: ["dev-token"]
//!   assertion:
//!     algorithm: hs256
//!     shared_secret: "change-me"
//!     issuer: "https://issuer.example.com"
//!   directory:
//!     users:
//!       jdoe: ["staff", "alumni"]
//!   sessions:
//!     cookie_name: gatekeeper_session
//!     login_url: "https://sso.example.com/cas/login"
//!     sessions:
//!       abc123: jdoe
//! ```

pub mod config;
pub mod domain;
pub mod error;
pub mod plugin;

pub use config::StaticGatekeeperPluginConfig;
pub use error::PluginError;
pub use plugin::StaticGatekeeperPlugin;
