//! EchoMind server binary
//!
//! Run with: cargo run -p echomind --bin echomind-server

use echomind::{config::EchoConfig, server::EchoServer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "echomind=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = EchoConfig::load()?;

    tracing::info!("Configuration loaded");
    tracing::info!(
        "  - Chunking: {:?} (size {}, overlap {})",
        config.chunking.policy,
        config.chunking.chunk_size,
        config.chunking.chunk_overlap
    );
    tracing::info!("  - Scoring: {:?}", config.scoring.strategy);
    tracing::info!("  - Top k: {}", config.retrieval.top_k);
    match &config.storage.path {
        Some(path) => tracing::info!("  - Storage: {}", path.display()),
        None => tracing::info!("  - Storage: in-memory"),
    }

    let server = EchoServer::new(config)?;
    tracing::info!("API available at http://{}", server.address());
    server.start().await?;

    Ok(())
}
