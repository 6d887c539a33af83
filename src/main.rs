use termfreq::config::ServiceConfig;
use termfreq::index::collection::CollectionIndex;
use termfreq::search::cache::response_cache;
use termfreq::search::router::create_router;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let development = std::env::var("APP_ENV").is_ok_and(|env| env == "development");
    let default_filter = if development { "debug" } else { "info" };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .init();

    let config = ServiceConfig::from_env_and_args()?;

    // 1. Index (loaded eagerly; queries would otherwise trigger it lazily):
    let index = CollectionIndex::with_extension(&config.documents_path, &config.extension);
    match index.load().await {
        Ok(summary) => tracing::info!(
            "Index ready: {} documents ({} unreadable)",
            summary.documents_indexed,
            summary.failed_documents.len()
        ),
        Err(err) => tracing::warn!("Serving an empty index: {}", err),
    }

    // 2. Response cache:
    match config.cache_ttl {
        Some(ttl) => tracing::info!("Response cache enabled (ttl {:?})", ttl),
        None => tracing::info!("Response cache disabled"),
    }
    let cache = response_cache(config.cache_ttl);

    // 3. HTTP Router:
    let app = create_router(index, cache);

    // 4. Start HTTP server:
    let http_addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(http_addr).await?;

    tracing::info!("HTTP server listening on {}", http_addr);
    tracing::info!("Press Ctrl+C to shutdown");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for Ctrl+C: {}", err);
        std::future::pending::<()>().await;
    }
}
