//! guestbook-api server entry point.
//!
//! Loads configuration, builds the configured store, and serves the
//! guestbook over HTTP until Ctrl-C.

use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use guestbook_api::api;
use guestbook_api::app_state::AppState;
use guestbook_api::config::{GuestbookConfig, LogFormat};
use guestbook_api::store::{GuestbookStore, MemoryStore, PostgresStore, StoreBackend, SystemClock};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = GuestbookConfig::from_env().context("loading configuration")?;

    // Initialize tracing
    init_tracing(config.log_format);
    tracing::info!(addr = %config.listen_addr, backend = %config.backend, "starting guestbook-api");

    // Build storage layer
    let store = build_store(&config)?;

    // Build router
    let app = api::build_app(AppState::new(store));

    // Start server
    let listener = tokio::net::TcpListener::bind(config.listen_addr)
        .await
        .with_context(|| format!("binding {}", config.listen_addr))?;
    tracing::info!(addr = %config.listen_addr, "server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("serving HTTP")?;

    tracing::info!("server stopped");
    Ok(())
}

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    match format {
        LogFormat::Pretty => builder.init(),
        LogFormat::Json => builder.json().init(),
    }
}

fn build_store(config: &GuestbookConfig) -> anyhow::Result<Arc<dyn GuestbookStore>> {
    let store: Arc<dyn GuestbookStore> = match config.backend {
        StoreBackend::Memory => {
            tracing::warn!(
                capacity = config.memory_capacity,
                "memory backend: entries are lost when the process exits"
            );
            let clock = Arc::new(SystemClock);
            if config.seed_demo_entries {
                Arc::new(MemoryStore::with_demo_entries(config.memory_capacity, clock))
            } else {
                Arc::new(MemoryStore::with_clock(config.memory_capacity, clock))
            }
        }
        StoreBackend::Postgres => {
            let store = PostgresStore::connect_lazy(config).context("configuring PostgreSQL pool")?;
            tracing::info!(table = store.table(), "postgres backend configured");
            Arc::new(store)
        }
    };
    Ok(store)
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}
