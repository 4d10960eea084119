//! HTTP server initialization and runtime setup.
//!
//! Handles store and cache selection, the cache worker, and Axum server lifecycle.

use crate::application::services::LinkService;
use crate::config::{CacheBackend, Config, StoreBackend};
use crate::domain::cache_worker::cache_task_queue;
use crate::domain::repositories::LinkRepository;
use crate::infrastructure::cache::{CacheProvider, LocalCache, RedisCache};
use crate::infrastructure::persistence::{MemoryLinkRepository, PgLinkRepository};
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

/// Builds the link store selected by the configuration and ensures its
/// schema exists.
///
/// # Errors
///
/// Returns an error if the database is unreachable or migrations fail.
pub async fn build_store(config: &Config) -> Result<Arc<dyn LinkRepository>> {
    let store: Arc<dyn LinkRepository> = match config.store_backend {
        StoreBackend::Postgres => {
            let database_url = config
                .database_url
                .as_deref()
                .context("DATABASE_URL must be set for the postgres store")?;

            let pool = PgPoolOptions::new()
                .max_connections(config.db_max_connections)
                .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
                .connect(database_url)
                .await
                .context("Failed to connect to database")?;
            tracing::info!("Connected to database");

            Arc::new(PgLinkRepository::new(Arc::new(pool)))
        }
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory link store; links are lost on restart");
            Arc::new(MemoryLinkRepository::new())
        }
    };

    store
        .init_database()
        .await
        .context("Failed to initialize link store")?;

    Ok(store)
}

/// Builds the cache provider selected by the configuration.
///
/// A Redis backend that cannot be reached at startup falls back to the
/// embedded cache so redirects keep working from the store.
pub async fn build_cache(config: &Config) -> Arc<dyn CacheProvider> {
    let local = || -> Arc<dyn CacheProvider> {
        Arc::new(LocalCache::new(
            config.local_cache_ttl(),
            config.local_cache_max_entries,
        ))
    };

    match (config.cache_backend, config.redis_url.as_deref()) {
        (CacheBackend::Redis, Some(redis_url)) => match RedisCache::connect(redis_url).await {
            Ok(redis) => {
                tracing::info!("Cache enabled (Redis)");
                Arc::new(redis)
            }
            Err(e) => {
                tracing::warn!("Failed to connect to Redis: {}. Using local cache.", e);
                local()
            }
        },
        _ => {
            tracing::info!("Cache enabled (local)");
            local()
        }
    }
}

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - Link store (PostgreSQL with migrations, or in-memory)
/// - Cache provider (local or Redis)
/// - Cache propagation queue and its single worker
/// - Axum HTTP server
///
/// On Ctrl+C the server stops accepting connections, finishes in-flight
/// requests, then waits for the worker to apply every queued task.
///
/// # Errors
///
/// Returns an error if:
/// - Store initialization fails
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let store = build_store(&config).await?;
    let cache = build_cache(&config).await;

    let (queue, worker) = cache_task_queue(config.cache_queue_capacity, cache.clone());
    let worker_handle = tokio::spawn(worker.run());
    tracing::info!(
        capacity = config.cache_queue_capacity,
        "Cache worker started"
    );

    let state = AppState::new(LinkService::new(store, cache, queue));
    let app = app_router(state);

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    // The router, and with it the last queue sender, is gone once serve returns.
    tracing::info!("Server stopped, draining cache queue");
    worker_handle
        .await
        .context("Cache worker terminated abnormally")?;
    tracing::info!("Cache queue drained");

    Ok(())
}

/// Runs store initialization and exits.
///
/// # Errors
///
/// Returns an error if the store cannot be reached or migrated.
pub async fn init_db(config: Config) -> Result<()> {
    build_store(&config).await?;
    tracing::info!("Link store initialized ({})", config.store_backend);
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
