#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
//! Gatekeeper server
//!
//! Hosts demo routes behind both gatekeeper modes, wired to the static
//! plugin's collaborators:
//!
//! - `GET /healthz` - open
//! - `GET /machine/whoami` - machine-only
//! - `GET /user/whoami` - machine or interactive user in an allowed group

pub mod app;
pub mod config;
pub mod logging;
