use std::sync::Arc;

use anyhow::Context;
use tracing::{info, warn};

use stackfood_api::app::{build_app, services::AppServices};
use stackfood_infra::config::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::from_env()?;
    stackfood_observability::init(config.log_format);

    let services = Arc::new(AppServices::from_config(&config).await?);
    let app = build_app(services);

    let addr = config.server.bind_addr();
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    info!(addr = %listener.local_addr()?, "listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for ctrl-c");
        return;
    }
    info!("shutdown signal received");
}
