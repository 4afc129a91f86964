//! PostgreSQL-backed session store.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use rentdesk_core::result::AppResult;
use rentdesk_database::classify_sqlx_error;
use rentdesk_entity::session::{Session, SessionStats};

use super::store::SessionStore;

/// Session store over the shared PostgreSQL pool.
#[derive(Debug, Clone)]
pub struct PgSessionStore {
    pool: PgPool,
}

impl PgSessionStore {
    /// Create a new Postgres session store.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SessionStore for PgSessionStore {
    async fn put(&self, session: &Session) -> AppResult<()> {
        sqlx::query(
            "INSERT INTO sessions \
             (token, user_id, issued_at, expires_at, last_activity_at, is_active, \
              ip_address, user_agent, device_type, device_name) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)",
        )
        .bind(&session.token)
        .bind(session.user_id)
        .bind(session.issued_at)
        .bind(session.expires_at)
        .bind(session.last_activity_at)
        .bind(session.is_active)
        .bind(&session.ip_address)
        .bind(&session.user_agent)
        .bind(&session.device_type)
        .bind(&session.device_name)
        .execute(&self.pool)
        .await
        .map_err(|e| classify_sqlx_error("Failed to persist session", e))?;
        Ok(())
    }

    async fn get(&self, token: &str) -> AppResult<Option<Session>> {
        sqlx::query_as::<_, Session>("SELECT * FROM sessions WHERE token = $1")
            .bind(token)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| classify_sqlx_error("Failed to fetch session", e))
    }

    async fn touch(&self, token: &str, at: DateTime<Utc>) -> AppResult<()> {
        sqlx::query("UPDATE sessions SET last_activity_at = $2 WHERE token = $1")
            .bind(token)
            .bind(at)
            .execute(&self.pool)
            .await
            .map_err(|e| classify_sqlx_error("Failed to record session activity", e))?;
        Ok(())
    }

    async fn deactivate_owned(&self, token: &str, user_id: Uuid) -> AppResult<bool> {
        let result =
            sqlx::query("UPDATE sessions SET is_active = FALSE WHERE token = $1 AND user_id = $2")
                .bind(token)
                .bind(user_id)
                .execute(&self.pool)
                .await
                .map_err(|e| classify_sqlx_error("Failed to revoke session", e))?;
        Ok(result.rows_affected() > 0)
    }

    async fn deactivate_all(&self, user_id: Uuid, except_token: Option<&str>) -> AppResult<u64> {
        // One statement: no session escapes through a race with a
        // concurrent validation.
        let result = sqlx::query(
            "UPDATE sessions SET is_active = FALSE \
             WHERE user_id = $1 AND is_active \
             AND ($2::text IS NULL OR token <> $2)",
        )
        .bind(user_id)
        .bind(except_token)
        .execute(&self.pool)
        .await
        .map_err(|e| classify_sqlx_error("Failed to revoke sessions", e))?;
        Ok(result.rows_affected())
    }

    async fn sweep_expired(&self, now: DateTime<Utc>) -> AppResult<u64> {
        let result =
            sqlx::query("UPDATE sessions SET is_active = FALSE WHERE is_active AND expires_at < $1")
                .bind(now)
                .execute(&self.pool)
                .await
                .map_err(|e| classify_sqlx_error("Failed to sweep expired sessions", e))?;
        Ok(result.rows_affected())
    }

    async fn list_for_user(&self, user_id: Uuid) -> AppResult<Vec<Session>> {
        sqlx::query_as::<_, Session>(
            "SELECT * FROM sessions WHERE user_id = $1 ORDER BY issued_at DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| classify_sqlx_error("Failed to list sessions", e))
    }

    async fn stats_for_user(&self, user_id: Uuid, now: DateTime<Utc>) -> AppResult<SessionStats> {
        let (total, active, expired): (i64, i64, i64) = sqlx::query_as(
            "SELECT COUNT(*), \
                    COUNT(*) FILTER (WHERE is_active AND expires_at > $2), \
                    COUNT(*) FILTER (WHERE expires_at <= $2) \
             FROM sessions WHERE user_id = $1",
        )
        .bind(user_id)
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| classify_sqlx_error("Failed to count sessions", e))?;

        Ok(SessionStats {
            total: total as u64,
            active: active as u64,
            expired: expired as u64,
        })
    }
}
