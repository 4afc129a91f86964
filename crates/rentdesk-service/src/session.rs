//! Read-only session views: per-user device listing and statistics.
//!
//! These views expose the liveness predicate from the entity model; they
//! never mutate sessions and are only as fresh as the last sweep for the
//! `expired` count.

use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;
use uuid::Uuid;

use rentdesk_auth::session::SessionStore;
use rentdesk_core::result::AppResult;
use rentdesk_entity::session::SessionStats;
use rentdesk_entity::user::Identity;

/// One session row as shown in a "your devices" view.
#[derive(Debug, Clone, Serialize)]
pub struct SessionView {
    /// The session token's user. Tokens themselves are never echoed back.
    pub user_id: Uuid,
    /// Whether the session is live right now.
    pub live: bool,
    /// Issuance time.
    pub issued_at: chrono::DateTime<Utc>,
    /// Expiry horizon.
    pub expires_at: chrono::DateTime<Utc>,
    /// Last successful validation.
    pub last_activity_at: chrono::DateTime<Utc>,
    /// Device class at issuance.
    pub device_type: Option<String>,
    /// Device name at issuance.
    pub device_name: Option<String>,
}

/// Read-only session listing and statistics for the acting user.
#[derive(Clone)]
pub struct SessionOverviewService {
    store: Arc<dyn SessionStore>,
}

impl SessionOverviewService {
    /// Create a new overview service.
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self { store }
    }

    /// All sessions of the acting user, newest first.
    pub async fn list(&self, identity: &Identity) -> AppResult<Vec<SessionView>> {
        let now = Utc::now();
        let sessions = self.store.list_for_user(identity.user_id).await?;
        Ok(sessions
            .into_iter()
            .map(|s| SessionView {
                user_id: s.user_id,
                live: s.is_live(now),
                issued_at: s.issued_at,
                expires_at: s.expires_at,
                last_activity_at: s.last_activity_at,
                device_type: s.device_type,
                device_name: s.device_name,
            })
            .collect())
    }

    /// Total/active/expired counts for the acting user.
    pub async fn stats(&self, identity: &Identity) -> AppResult<SessionStats> {
        self.store.stats_for_user(identity.user_id, Utc::now()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use rentdesk_auth::session::MemorySessionStore;
    use rentdesk_entity::session::Session;

    fn session(user_id: Uuid, token: &str, is_active: bool, expires_in: Duration) -> Session {
        let now = Utc::now();
        Session {
            token: token.into(),
            user_id,
            issued_at: now,
            expires_at: now + expires_in,
            last_activity_at: now,
            is_active,
            ip_address: None,
            user_agent: None,
            device_type: Some("desktop".into()),
            device_name: None,
        }
    }

    #[tokio::test]
    async fn views_expose_liveness_not_tokens() {
        let store = Arc::new(MemorySessionStore::new());
        let user_id = Uuid::new_v4();
        store
            .put(&session(user_id, "a", true, Duration::days(7)))
            .await
            .unwrap();
        store
            .put(&session(user_id, "b", false, Duration::days(7)))
            .await
            .unwrap();

        let service = SessionOverviewService::new(store);
        let identity = Identity {
            user_id,
            company_id: Uuid::new_v4(),
            role_id: Uuid::new_v4(),
            is_admin: false,
        };

        let views = service.list(&identity).await.unwrap();
        assert_eq!(views.len(), 2);
        assert_eq!(views.iter().filter(|v| v.live).count(), 1);

        let stats = service.stats(&identity).await.unwrap();
        assert_eq!(stats.total, 2);
        assert_eq!(stats.active, 1);
    }
}
