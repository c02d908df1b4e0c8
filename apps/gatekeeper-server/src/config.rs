use std::net::SocketAddr;
use std::path::Path;

use anyhow::{Context, bail};
use figment::Figment;
use figment::providers::{Env, Format, Yaml};
use gatekeeper::GatekeeperConfig;
use serde::Deserialize;
use static_gatekeeper_plugin::StaticGatekeeperPluginConfig;

/// Prefix of environment overrides, e.g.
/// `GATEKEEPER_GATEKEEPER__LOCAL_ENVIRONMENT=true`.
pub const ENV_PREFIX: &str = "GATEKEEPER_";

/// Top-level server configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerConfig {
    pub server: HttpConfig,
    pub logging: LoggingConfig,
    pub gatekeeper: GatekeeperConfig,
    pub static_plugin: StaticGatekeeperPluginConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HttpConfig {
    pub bind_addr: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:8087".to_owned(),
        }
    }
}

impl HttpConfig {
    /// # Errors
    ///
    /// Returns an error if `bind_addr` is not `ip:port`.
    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        self.bind_addr
            .parse()
            .with_context(|| format!("invalid bind_addr '{}'", self.bind_addr))
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    /// Default filter directive; `RUST_LOG` takes precedence when set.
    pub level: String,
    /// Emit JSON lines instead of human-readable output.
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_owned(),
            json: false,
        }
    }
}

impl ServerConfig {
    /// Load from an optional YAML file, then `GATEKEEPER_` environment
    /// variables (`__` separates nested keys).
    ///
    /// # Errors
    ///
    /// Returns an error if the file is missing or any source fails to parse.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let mut figment = Figment::new();
        if let Some(path) = path {
            if !path.is_file() {
                bail!("config file '{}' not found", path.display());
            }
            figment = figment.merge(Yaml::file(path));
        }
        figment
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()
            .context("failed to load configuration")
    }
}
