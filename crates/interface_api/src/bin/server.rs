//! Member Registry - API Server Binary
//!
//! # Usage
//!
//! ```bash
//! # Run with default configuration
//! cargo run --bin registry-api
//!
//! # Run with environment variables
//! API_PORT=8080 API_DOCSTORE_ENDPOINT=postgres://registry@db:5432 API_DOCSTORE_KEY=... cargo run --bin registry-api
//! ```
//!
//! # Environment Variables
//!
//! * `API_HOST` - Server host (default: 0.0.0.0)
//! * `API_PORT` - Server port (default: 8080)
//! * `API_LOG_LEVEL` - Log level: trace, debug, info, warn, error (default: info)
//! * `API_DOCSTORE_ENDPOINT` - Document store endpoint URI
//! * `API_DOCSTORE_KEY` - Document store access key
//! * `API_DOCSTORE_MAX_CONNECTIONS` - Connection pool size (default: 10)

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use infra_db::{create_pool, ensure_database, ensure_schema, PostgresDocumentStore, DATABASE_ID};
use interface_api::{config::ApiConfig, create_router};

/// Initializes logging, bootstraps the document store and serves HTTP until
/// Ctrl+C or SIGTERM.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present (useful for local development)
    dotenvy::dotenv().ok();

    let config = load_config();

    init_tracing(&config.log_level);

    tracing::info!(
        host = %config.host,
        port = %config.port,
        endpoint = %config.docstore_endpoint,
        "Starting Member Registry API Server"
    );

    let db_config = config.database_config();
    if ensure_database(&db_config)
        .await
        .context("failed to prepare the registry database")?
    {
        tracing::info!(database = DATABASE_ID, "Created registry database");
    }

    let pool = create_pool(db_config)
        .await
        .context("failed to connect to the document store")?;
    ensure_schema(&pool)
        .await
        .context("failed to apply the document schema")?;

    let store = Arc::new(PostgresDocumentStore::new(pool));
    let app = create_router(store, config.clone());

    let addr: SocketAddr = config
        .server_addr()
        .parse()
        .with_context(|| format!("invalid server address {}", config.server_addr()))?;

    tracing::info!(%addr, "Server listening");

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Loads configuration from `API_*` variables
///
/// When the environment cannot be deserialized as a whole, falls back to
/// reading each variable on its own with defaults.
fn load_config() -> ApiConfig {
    ApiConfig::from_env().unwrap_or_else(|e| {
        eprintln!("Falling back to per-variable configuration: {}", e);
        let defaults = ApiConfig::default();
        ApiConfig {
            host: std::env::var("API_HOST").unwrap_or(defaults.host),
            port: std::env::var("API_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.port),
            log_level: std::env::var("API_LOG_LEVEL")
                .or_else(|_| std::env::var("RUST_LOG"))
                .unwrap_or(defaults.log_level),
            docstore_endpoint: std::env::var("API_DOCSTORE_ENDPOINT")
                .unwrap_or(defaults.docstore_endpoint),
            docstore_key: std::env::var("API_DOCSTORE_KEY").unwrap_or(defaults.docstore_key),
            docstore_max_connections: std::env::var("API_DOCSTORE_MAX_CONNECTIONS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.docstore_max_connections),
        }
    })
}

/// Initializes the tracing subscriber, preferring `RUST_LOG` over the configured level
fn init_tracing(log_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .init();
}

/// Waits for Ctrl+C or SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}
