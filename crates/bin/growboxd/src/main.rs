//! # growboxd — growbox daemon
//!
//! Composition root that wires all adapters together and starts the server.
//!
//! ## Responsibilities
//! - Load configuration (config file, env vars)
//! - Initialize logging
//! - Initialize the `SQLite` connection pool and run migrations
//! - Construct repository implementations (adapters)
//! - Construct application services, injecting repositories via port traits
//! - Build the axum router, injecting application services
//! - Bind to a TCP port and serve until SIGINT/SIGTERM
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer — no domain logic belongs here.

mod config;

use anyhow::Context;
use tokio::signal;
use tracing_subscriber::EnvFilter;

use growbox_adapter_http_axum::state::AppState;
use growbox_adapter_storage_sqlite_sqlx::{
    Config as StorageConfig, SqliteControlRepository, SqliteSensorReadingRepository,
};
use growbox_app::clock::SystemClock;
use growbox_app::retry::RetryPolicy;
use growbox_app::services::control_service::ControlService;
use growbox_app::services::sensor_service::SensorService;

use crate::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load().context("loading configuration")?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(&config.logging.filter)?)
        .init();

    // Database
    let db = StorageConfig {
        database_url: config.database_url().to_string(),
        busy_timeout: config.busy_timeout(),
        max_connections: config.database.max_connections,
    }
    .build()
    .await
    .context("opening database")?;
    let pool = db.pool().clone();

    // Repositories
    let control_repo = SqliteControlRepository::new(pool.clone());
    let reading_repo = SqliteSensorReadingRepository::new(pool);

    // Clock
    let clock = match config.schedule.utc_offset_minutes {
        Some(minutes) => SystemClock::with_offset_minutes(minutes)
            .with_context(|| format!("invalid utc offset {minutes}"))?,
        None => SystemClock::local(),
    };

    // Services
    let retry = RetryPolicy::new(config.store.retry_attempts, config.retry_backoff());
    let control_service = ControlService::new(control_repo, clock).with_retry_policy(retry);
    let sensor_service = SensorService::new(reading_repo, clock).with_retry_policy(retry);

    // HTTP
    let state = AppState::new(control_service, sensor_service);
    let app = growbox_adapter_http_axum::router::build(state);

    let bind_addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("binding {bind_addr}"))?;
    tracing::info!("growboxd listening on http://{bind_addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    db.pool().close().await;
    tracing::info!("growboxd stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            tracing::error!(error = %err, "failed to install Ctrl+C handler");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => tracing::info!("received Ctrl+C, shutting down"),
        () = terminate => tracing::info!("received SIGTERM, shutting down"),
    }
}
