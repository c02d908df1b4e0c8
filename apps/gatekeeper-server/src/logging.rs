use tracing_subscriber::EnvFilter;

use crate::config::LoggingConfig;

/// `RUST_LOG` when it parses, otherwise the configured level.
fn env_filter(cfg: &LoggingConfig) -> anyhow::Result<EnvFilter> {
    let filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(&cfg.level))?;
    Ok(filter)
}

/// Install the global subscriber.
///
/// # Errors
///
/// Returns an error for an invalid filter directive or when a subscriber is
/// already installed.
pub fn init(cfg: &LoggingConfig) -> anyhow::Result<()> {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter(cfg)?)
        .with_target(true);

    if cfg.json {
        builder.json().try_init().map_err(|e| anyhow::anyhow!(e))
    } else {
        builder.try_init().map_err(|e| anyhow::anyhow!(e))
    }
}
