use anyhow::Result;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

use avg_window_server::{ApiServer, ServerConfig};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_target(false)
        .init();

    info!("Starting average calculator microservice...");

    // Optional config file path as the sole argument; defaults otherwise.
    let config_path = std::env::args().nth(1).map(PathBuf::from);
    let config = ServerConfig::load(config_path.as_deref())?;
    config.validate()?;
    info!(
        port = config.port,
        capacity = config.window.capacity,
        upstream = %config.upstream.base_url,
        "Configuration loaded"
    );

    let server = ApiServer::new(config)?;
    server.run().await?;

    Ok(())
}
