//! Companion backend binary.
//!
//! Serves `GET /` (health) and `POST /chat` over the offline reply engine
//! until interrupted.

use neura::config::NeuraConfig;
use neura::server::{ChatServer, ReplyEngine};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("neura=info")),
        )
        .init();

    let config = NeuraConfig::load().map_err(|e| anyhow::anyhow!("failed to load config: {e}"))?;
    let engine = ReplyEngine::new(&config.reply);

    let server = ChatServer::start(engine, &config.server)
        .await
        .map_err(|e| anyhow::anyhow!("failed to start backend: {e}"))?;
    println!("Neura backend v{} on {}", env!("CARGO_PKG_VERSION"), server.base_url());

    tokio::signal::ctrl_c().await?;
    tracing::info!("received Ctrl+C, shutting down...");
    server.shutdown();

    Ok(())
}
