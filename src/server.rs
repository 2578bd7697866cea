//! HTTP server initialization and runtime setup.
//!
//! Handles storage selection, database connections, service wiring, and
//! the Axum server lifecycle.

use crate::application::services::{AuthService, ShortenerService};
use crate::config::{Config, StorageBackend};
use crate::domain::repositories::ShortUrlRepository;
use crate::infrastructure::auth::JwtTokenAuthority;
use crate::infrastructure::persistence::{InMemoryShortUrlRepository, PgShortUrlRepository};
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - The record store (PostgreSQL pool + migrations, or in-memory)
/// - JWT token authority and access policy
/// - Axum HTTP server with graceful shutdown on Ctrl+C / SIGTERM
///
/// # Errors
///
/// Returns an error if:
/// - Database connection or migration fails
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let repository = build_repository(&config).await?;

    let shortener_service = Arc::new(ShortenerService::new(
        repository,
        config.base_url.clone(),
        config.short_code_length,
    ));

    let authority = Arc::new(JwtTokenAuthority::new(
        &config.jwt_secret,
        config.jwt_expiry_seconds,
    ));
    let auth_service = Arc::new(AuthService::new(authority, config.access_policy.clone()));

    let state = AppState::new(shortener_service, auth_service);

    let app = app_router(state);

    let addr: SocketAddr = config
        .listen_addr
        .parse()
        .with_context(|| format!("Invalid listen address '{}'", config.listen_addr))?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(listener, ServiceExt::<Request>::into_make_service(app))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

/// Builds the record store selected by `STORAGE_BACKEND`.
async fn build_repository(config: &Config) -> Result<Arc<dyn ShortUrlRepository>> {
    match config.storage_backend {
        StorageBackend::Memory => {
            tracing::warn!("Using in-memory storage; records are lost on restart");
            Ok(Arc::new(InMemoryShortUrlRepository::new()))
        }
        StorageBackend::Postgres => {
            let pool = connect_pool(config).await?;
            Ok(Arc::new(PgShortUrlRepository::new(Arc::new(pool))))
        }
    }
}

/// Connects to PostgreSQL with the configured pool settings and applies
/// pending migrations.
pub async fn connect_pool(config: &Config) -> Result<PgPool> {
    let database_url = config
        .database_url
        .as_deref()
        .context("DATABASE_URL is required for the postgres storage backend")?;

    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
        .idle_timeout(Duration::from_secs(config.db_idle_timeout))
        .max_lifetime(Duration::from_secs(config.db_max_lifetime))
        .connect(database_url)
        .await
        .context("Failed to connect to database")?;
    tracing::info!("Connected to database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to run migrations")?;

    Ok(pool)
}

/// Resolves when the process receives Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::warn!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }

    tracing::info!("Shutdown signal received, draining connections");
}
