//! RentDesk server: the session lifecycle daemon.
//!
//! Loads configuration, initializes logging, runs migrations, and keeps
//! the periodic session expiry sweep running until shutdown. Transports
//! consume the session and guard services through the library crates.

use std::sync::Arc;

use tokio::sync::watch;
use tracing_subscriber::{EnvFilter, fmt};

use rentdesk_auth::session::{PgSessionStore, SessionStore, SessionSweeper};
use rentdesk_core::config::AppConfig;
use rentdesk_core::error::AppError;
use rentdesk_database::DatabasePool;

#[tokio::main]
async fn main() {
    let env = std::env::var("RENTDESK_ENV").unwrap_or_else(|_| "development".to_string());
    let config = match AppConfig::load(&env) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {e}");
        std::process::exit(1);
    }
}

/// Initialize tracing/logging.
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
        _ => {
            fmt().pretty().with_env_filter(filter).init();
        }
    }
}

async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting RentDesk v{}", env!("CARGO_PKG_VERSION"));

    let db = DatabasePool::connect(&config.database).await?;

    tracing::info!("Running database migrations");
    sqlx::migrate!("./migrations")
        .run(db.pool())
        .await
        .map_err(|e| AppError::database(format!("Migration failed: {e}")))?;

    let session_store: Arc<dyn SessionStore> = Arc::new(PgSessionStore::new(db.pool().clone()));

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let sweeper = SessionSweeper::new(session_store);
    let sweep_interval =
        std::time::Duration::from_secs(config.session.sweep_interval_minutes * 60);
    let sweeper_handle = tokio::spawn(sweeper.run(sweep_interval, shutdown_rx));

    tracing::info!(
        sweep_interval_minutes = config.session.sweep_interval_minutes,
        "RentDesk running; press Ctrl-C to stop"
    );

    tokio::signal::ctrl_c()
        .await
        .map_err(|e| AppError::internal(format!("Failed to listen for shutdown signal: {e}")))?;

    tracing::info!("Shutdown signal received");
    let _ = shutdown_tx.send(true);
    let _ = sweeper_handle.await;
    db.close().await;

    Ok(())
}
