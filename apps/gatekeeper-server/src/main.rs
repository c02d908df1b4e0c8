use std::path::PathBuf;

use clap::Parser;
use gatekeeper_server::{app, config::ServerConfig, logging};
use tracing::info;

#[derive(Debug, Parser)]
#[command(name = "gatekeeper-server", version, about = "Gatekeeper demo server")]
struct Cli {
    /// YAML configuration file.
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Validate configuration and exit.
    #[arg(long)]
    check: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let cfg = ServerConfig::load(cli.config.as_deref())?;
    logging::init(&cfg.logging)?;

    let addr = cfg.server.socket_addr()?;
    let gatekeeper = app::build_gatekeeper(&cfg)?;
    let router = app::build_router(&gatekeeper)?;

    if cli.check {
        info!("Configuration is valid");
        return Ok(());
    }

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "Gatekeeper server listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| anyhow::anyhow!(e))
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("HTTP server shutting down gracefully");
}
