use std::net::SocketAddr;
use std::sync::Arc;

use film_story_generator::{
    routes::{router, AppState},
    AppConfig, FallbackOrchestrator,
};
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    // Init tracing
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt().with_env_filter(filter).init();

    let config = AppConfig::from_env();
    let configured = config.configured_providers();
    if configured.is_empty() {
        tracing::warn!("No provider API keys configured; every generation will fail");
    } else {
        tracing::info!("Providers with API keys: {}", configured.join(", "));
    }

    let shutdown = CancellationToken::new();
    let state = AppState {
        orchestrator: Arc::new(FallbackOrchestrator::from_config(&config)?),
        shutdown: shutdown.clone(),
    };
    let app = router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!(%addr, "Starting server");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            tokio::signal::ctrl_c().await.ok();
            tracing::info!("Shutting down");
            shutdown.cancel();
        })
        .await?;
    Ok(())
}
