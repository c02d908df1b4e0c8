#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
//! Gatekeeper
//!
//! Decides, per incoming request, whether the caller may reach the wrapped
//! handler. Two entry points are exposed as axum middleware:
//!
//! - **machine-only** ([`api::middleware::authenticate`]): local environment
//!   bypass, then bearer token, then federated JWT assertion. Anything else is
//!   `400 Not authorized`.
//! - **user-capable** ([`api::middleware::authenticate_user`]): the same
//!   machine checks, then an interactive session whose user must belong to at
//!   least one group of the configured allow-list.
//!
//! ## Example
//!
//! ```ignore
//! let gatekeeper = Gatekeeper::builder(config)
//!     .bearer_verifier(bearer)
//!     .assertion_verifier(assertion)
//!     .directory(directory)
//!     .session_gate(sessions)
//!     .build()?;
//!
//! let machine = gatekeeper.authenticate(Router::new().route("/jobs", post(run_job)));
//! let user = gatekeeper.authenticate_user(Router::new().route("/rooms", get(rooms)))?;
//! let app = machine.merge(user);
//! ```

pub mod api;
pub mod config;
pub mod domain;
pub mod pipeline;

pub use config::{AllowList, GatekeeperConfig};
pub use domain::error::{AuthError, ConfigError};
pub use domain::groups::{GroupGatekeeper, GroupSet};
pub use domain::machine::MachineAuthorizer;
pub use domain::request::{ASSERTION_HEADER, AuthRequest, Credential};
pub use domain::verdict::Verdict;
pub use pipeline::{Gatekeeper, GatekeeperBuilder};
