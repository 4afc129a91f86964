//! In-memory session store using a Tokio mutex for single-node deployments.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::Mutex;
use uuid::Uuid;

use rentdesk_core::result::AppResult;
use rentdesk_entity::session::{Session, SessionStats};

use super::store::SessionStore;

/// In-memory session store keyed by token.
///
/// Suitable for single-node deployments and tests. The mutex makes every
/// operation atomic, matching the single-statement semantics of the
/// Postgres backend.
#[derive(Debug, Clone, Default)]
pub struct MemorySessionStore {
    sessions: Arc<Mutex<HashMap<String, Session>>>,
}

impl MemorySessionStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn put(&self, session: &Session) -> AppResult<()> {
        self.sessions
            .lock()
            .await
            .insert(session.token.clone(), session.clone());
        Ok(())
    }

    async fn get(&self, token: &str) -> AppResult<Option<Session>> {
        Ok(self.sessions.lock().await.get(token).cloned())
    }

    async fn touch(&self, token: &str, at: DateTime<Utc>) -> AppResult<()> {
        if let Some(session) = self.sessions.lock().await.get_mut(token) {
            session.last_activity_at = at;
        }
        Ok(())
    }

    async fn deactivate_owned(&self, token: &str, user_id: Uuid) -> AppResult<bool> {
        let mut sessions = self.sessions.lock().await;
        match sessions.get_mut(token) {
            Some(session) if session.user_id == user_id => {
                session.is_active = false;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn deactivate_all(&self, user_id: Uuid, except_token: Option<&str>) -> AppResult<u64> {
        let mut sessions = self.sessions.lock().await;
        let mut revoked = 0u64;
        for session in sessions.values_mut() {
            if session.user_id == user_id
                && session.is_active
                && except_token != Some(session.token.as_str())
            {
                session.is_active = false;
                revoked += 1;
            }
        }
        Ok(revoked)
    }

    async fn sweep_expired(&self, now: DateTime<Utc>) -> AppResult<u64> {
        let mut sessions = self.sessions.lock().await;
        let mut swept = 0u64;
        for session in sessions.values_mut() {
            if session.is_active && session.expires_at < now {
                session.is_active = false;
                swept += 1;
            }
        }
        Ok(swept)
    }

    async fn list_for_user(&self, user_id: Uuid) -> AppResult<Vec<Session>> {
        let sessions = self.sessions.lock().await;
        let mut owned: Vec<Session> = sessions
            .values()
            .filter(|s| s.user_id == user_id)
            .cloned()
            .collect();
        owned.sort_by(|a, b| b.issued_at.cmp(&a.issued_at));
        Ok(owned)
    }

    async fn stats_for_user(&self, user_id: Uuid, now: DateTime<Utc>) -> AppResult<SessionStats> {
        let sessions = self.sessions.lock().await;
        let mut stats = SessionStats::default();
        for session in sessions.values().filter(|s| s.user_id == user_id) {
            stats.total += 1;
            if session.is_live(now) {
                stats.active += 1;
            }
            if session.is_expired(now) {
                stats.expired += 1;
            }
        }
        Ok(stats)
    }
}
