use tracing_subscriber::EnvFilter;

use graphrag_api::api;
use graphrag_api::config::Config;
use graphrag_api::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Loaded before tracing so RUST_LOG and provider fallbacks may live in a local .env
    let dotenv = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    if let Ok(path) = dotenv {
        tracing::info!("Loaded environment from {}", path.display());
    }

    let config = Config::from_env();
    tracing::info!("Projects directory: {}", config.projects_dir.display());
    tracing::info!("GraphRAG program: {}", config.graphrag_bin.display());
    if config.fallbacks.api_key.is_none() {
        tracing::warn!("GRAPHRAG_API_KEY is not set; create requests must supply api_key");
    }

    let state = AppState::new(config.clone())?;
    let app = api::router(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("Server listening on {}", config.bind_addr);

    axum::serve(listener, app).await?;
    Ok(())
}
