//! Periodic expiry sweep.
//!
//! Marks sessions past their expiry horizon inactive. Validation re-checks
//! `expires_at` itself, so the sweep is never required for correctness.
//! It only keeps session listings and statistics honest.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::sync::watch;
use tracing::{error, info};

use rentdesk_core::result::AppResult;

use super::store::SessionStore;

/// Handles periodic cleanup of expired sessions.
#[derive(Clone)]
pub struct SessionSweeper {
    store: Arc<dyn SessionStore>,
}

impl std::fmt::Debug for SessionSweeper {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionSweeper").finish()
    }
}

impl SessionSweeper {
    /// Create a new sweeper over the shared store.
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self { store }
    }

    /// Run one sweep cycle. Returns the number of sessions marked
    /// inactive.
    pub async fn run_sweep(&self) -> AppResult<u64> {
        let swept = self.store.sweep_expired(Utc::now()).await?;
        if swept > 0 {
            info!(swept = swept, "Expired sessions marked inactive");
        }
        Ok(swept)
    }

    /// Run the sweep on an interval until shutdown is signalled.
    pub async fn run(self, interval: Duration, mut shutdown: watch::Receiver<bool>) {
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    if let Err(e) = self.run_sweep().await {
                        error!(error = %e, "Session sweep failed");
                    }
                }
                _ = shutdown.changed() => {
                    info!("Session sweeper shutting down");
                    break;
                }
            }
        }
    }
}
