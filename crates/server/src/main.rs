//! FashionZone API server.
//!
//! Serves the storefront JSON API. The storage backend is chosen at startup
//! from `FZ_STORE_BACKEND`:
//!
//! - `memory` (default): process-local maps, reseeded on every boot
//! - `postgres`: sqlx pool against `FZ_DATABASE_URL`
//!
//! Sessions always live in process memory, so a restart logs everyone out
//! regardless of backend.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::sync::Arc;

use fashionzone_server::config::{AppConfig, StoreBackend};
use fashionzone_server::state::AppState;
use fashionzone_server::store::{MemoryStorage, PostgresStorage, Storage, create_pool};
use fashionzone_server::{build_router, seed};

#[tokio::main]
async fn main() {
    let config = AppConfig::from_env().expect("Failed to load configuration");

    // Defaults to info level for our crates if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "fashionzone_server=info,tower_http=debug".into());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let store: Arc<dyn Storage> = match config.store_backend {
        StoreBackend::Memory => {
            tracing::info!("using in-memory storage");
            Arc::new(MemoryStorage::new())
        }
        StoreBackend::Postgres => {
            let database_url = config
                .database_url
                .as_ref()
                .expect("FZ_DATABASE_URL is required for the postgres backend");
            let pool = create_pool(database_url)
                .await
                .expect("Failed to create database pool");
            tracing::info!("database pool created");
            // Migrations are NOT run on startup.
            // Apply them via: cargo run -p fashionzone-cli -- migrate
            Arc::new(PostgresStorage::new(pool))
        }
    };

    seed::seed_if_empty(store.as_ref())
        .await
        .expect("Failed to seed storage");

    let addr = config.socket_addr();
    let state = AppState::new(store, config);
    let app = build_router(state);

    tracing::info!("api listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}
