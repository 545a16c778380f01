//! notify-gateway server entry point.
//!
//! Starts the Axum HTTP server serving the notification endpoints.

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use sqlx::postgres::PgPoolOptions;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use notify_gateway::api;
use notify_gateway::app_state::AppState;
use notify_gateway::config::ServiceConfig;
use notify_gateway::domain::{IdGenerator, UuidIdGenerator};
use notify_gateway::store::{MemoryStore, NotificationStore, PostgresStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Load configuration
    let config = ServiceConfig::from_env()?;
    tracing::info!(addr = %config.listen_addr, "starting notify-gateway");

    // Build the store
    let ids: Arc<dyn IdGenerator> = Arc::new(UuidIdGenerator);
    let store: Arc<dyn NotificationStore> = if config.persistence_enabled {
        let pool = PgPoolOptions::new()
            .max_connections(config.database_max_connections)
            .min_connections(config.database_min_connections)
            .acquire_timeout(Duration::from_secs(config.database_connect_timeout_secs))
            .connect(&config.database_url)
            .await?;
        sqlx::migrate!("./migrations").run(&pool).await?;
        tracing::info!("connected to PostgreSQL document store");
        Arc::new(PostgresStore::new(pool, ids))
    } else {
        tracing::warn!("persistence disabled, notifications will not survive a restart");
        Arc::new(MemoryStore::new(ids))
    };

    // Build application state
    let app_state = AppState { store };

    // Build router
    let app = Router::new()
        .merge(api::build_router())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(app_state);

    // Start server
    let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;
    tracing::info!(addr = %config.listen_addr, "server listening");

    axum::serve(listener, app).await?;

    Ok(())
}
