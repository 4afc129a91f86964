//! Session lifecycle manager: issuance, validation, and revocation.

use std::sync::Arc;

use chrono::{Duration, Utc};
use tracing::{info, warn};
use uuid::Uuid;

use rentdesk_core::AppError;
use rentdesk_core::config::session::SessionConfig;
use rentdesk_core::result::AppResult;
use rentdesk_entity::session::{Session, SessionProvenance};
use rentdesk_entity::user::Identity;

use crate::directory::UserDirectory;
use crate::token::generate_token;

use super::store::SessionStore;

/// Manages the complete session lifecycle.
///
/// Every authenticated request passes through [`SessionManager::validate`];
/// login flows call [`SessionManager::issue`]; logout actions call the
/// revocation operations. The store and directory are trait objects so the
/// invariants here are independent of the persistence engine.
#[derive(Clone)]
pub struct SessionManager {
    /// Session persistence.
    store: Arc<dyn SessionStore>,
    /// Identity snapshot source.
    directory: Arc<dyn UserDirectory>,
    /// Session configuration.
    config: SessionConfig,
}

impl std::fmt::Debug for SessionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionManager")
            .field("config", &self.config)
            .finish()
    }
}

impl SessionManager {
    /// Create a new session manager.
    pub fn new(
        store: Arc<dyn SessionStore>,
        directory: Arc<dyn UserDirectory>,
        config: SessionConfig,
    ) -> Self {
        Self {
            store,
            directory,
            config,
        }
    }

    /// Issue a new session for an already-authenticated user.
    ///
    /// Called by the login flow after credentials are confirmed. There is
    /// no cap on concurrent sessions per user; multiple devices are
    /// expected.
    pub async fn issue(&self, user_id: Uuid, provenance: SessionProvenance) -> AppResult<Session> {
        self.issue_with_ttl(user_id, provenance, self.config.ttl_days)
            .await
    }

    /// Issue a session with an explicit lifetime in days.
    ///
    /// `expires_at` is fixed here and never extended by activity.
    pub async fn issue_with_ttl(
        &self,
        user_id: Uuid,
        provenance: SessionProvenance,
        ttl_days: u32,
    ) -> AppResult<Session> {
        let now = Utc::now();
        let session = Session {
            token: generate_token(),
            user_id,
            issued_at: now,
            expires_at: now + Duration::days(ttl_days as i64),
            last_activity_at: now,
            is_active: true,
            ip_address: provenance.ip_address,
            user_agent: provenance.user_agent,
            device_type: provenance.device_type,
            device_name: provenance.device_name,
        };

        self.store.put(&session).await?;

        info!(
            user_id = %user_id,
            expires_at = %session.expires_at,
            device_type = session.device_type.as_deref().unwrap_or("unknown"),
            "Session issued"
        );

        Ok(session)
    }

    /// Resolve a presented token to the acting identity.
    ///
    /// An unknown, expired, or revoked token all fail with the same
    /// `Unauthenticated` error; the distinction exists only in audit
    /// detail. A transient store failure propagates as `Unavailable` and is
    /// never downgraded to an authentication failure.
    pub async fn validate(&self, token: &str) -> AppResult<Identity> {
        let session = self
            .store
            .get(token)
            .await?
            .ok_or_else(|| AppError::unauthenticated().with_detail("token not in store"))?;

        let now = Utc::now();
        if !session.is_live(now) {
            return Err(AppError::unauthenticated().with_detail(format!(
                "session of user {} not live (is_active={}, expires_at={})",
                session.user_id, session.is_active, session.expires_at
            )));
        }

        // Best-effort: a lost activity update must not fail the request.
        if let Err(e) = self.store.touch(token, now).await {
            warn!(user_id = %session.user_id, error = %e, "Failed to record session activity");
        }

        self.directory
            .identity_snapshot(session.user_id)
            .await?
            .ok_or_else(|| {
                AppError::unauthenticated()
                    .with_detail(format!("user {} missing or deactivated", session.user_id))
            })
    }

    /// Revoke one session of the acting user.
    ///
    /// A token that exists but belongs to a different user fails exactly
    /// like a nonexistent token. Revoking an owned, already-inactive
    /// session is a no-op `Ok`.
    pub async fn revoke_one(&self, token: &str, acting_user_id: Uuid) -> AppResult<()> {
        let owned = self.store.deactivate_owned(token, acting_user_id).await?;
        if !owned {
            return Err(AppError::not_found()
                .with_detail(format!("no session of user {acting_user_id} for this token")));
        }
        info!(user_id = %acting_user_id, "Session revoked");
        Ok(())
    }

    /// Revoke every active session of a user, optionally keeping one (the
    /// "log out everywhere except here" case). Idempotent; returns the
    /// number revoked.
    pub async fn revoke_all(&self, user_id: Uuid, except_token: Option<&str>) -> AppResult<u64> {
        let revoked = self.store.deactivate_all(user_id, except_token).await?;
        info!(
            user_id = %user_id,
            revoked = revoked,
            kept_current = except_token.is_some(),
            "Bulk session revocation"
        );
        Ok(revoked)
    }
}
