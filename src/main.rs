use std::{sync::Arc, time::Duration};

use anyhow::Context;
use tower_http::services::ServeDir;
use tracing_subscriber::EnvFilter;

use movie_catalog::{
    config::Config,
    db::{create_pool, create_redis_client, Cache},
    routes::{create_router, AppState},
    services::{Catalog, ReviewStore, TrailerProvider, YouTubeProvider},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("movie_catalog=debug,tower_http=info")),
        )
        .init();

    let config = Config::from_env()?;
    let query_timeout = Duration::from_secs(config.query_timeout_secs);

    let pool = create_pool(&config.database_url, config.max_connections, query_timeout)
        .await
        .with_context(|| format!("Failed to open movie dataset at {}", config.database_url))?;
    tracing::info!(database_url = %config.database_url, "Connected to movie dataset");

    let reviews = ReviewStore::open(&config.reviews_path).await?;
    tracing::info!(path = %reviews.path().display(), "Review store ready");

    let (cache, cache_writer) = match &config.redis_url {
        Some(redis_url) => {
            let (cache, handle) = Cache::new(create_redis_client(redis_url)?).await;
            (Some(cache), Some(handle))
        }
        None => (None, None),
    };

    let trailers = match config.youtube_api_key.clone() {
        Some(api_key) => {
            let provider: Arc<dyn TrailerProvider> = Arc::new(YouTubeProvider::new(
                api_key,
                config.youtube_api_url.clone(),
                cache,
            ));
            Some(provider)
        }
        None => {
            tracing::warn!("YOUTUBE_API_KEY is not set, trailer search is disabled");
            None
        }
    };

    let state = Arc::new(AppState {
        catalog: Catalog::new(pool, query_timeout),
        reviews,
        trailers,
    });

    let mut app = create_router(state);
    if let Some(static_dir) = &config.static_dir {
        tracing::info!(dir = %static_dir.display(), "Serving static assets");
        app = app.fallback_service(ServeDir::new(static_dir));
    }

    let listener = tokio::net::TcpListener::bind(config.bind_address()).await?;
    tracing::info!("Server running on http://{}", config.bind_address());

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    if let Some(handle) = cache_writer {
        handle.shutdown().await;
    }

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}
