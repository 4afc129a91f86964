//! User repository implementation.

use sqlx::PgPool;
use uuid::Uuid;

use rentdesk_core::result::AppResult;
use rentdesk_entity::user::Identity;

use crate::classify_sqlx_error;

/// Repository for user lookups during session validation.
#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    /// Create a new user repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Fetch the authorization snapshot for a user.
    ///
    /// Read fresh on every validation so role or company changes take
    /// effect on the next request. Returns `None` for unknown or
    /// deactivated accounts.
    pub async fn find_identity(&self, user_id: Uuid) -> AppResult<Option<Identity>> {
        sqlx::query_as::<_, Identity>(
            "SELECT id AS user_id, company_id, role_id, is_admin \
             FROM users WHERE id = $1 AND status = 'active'",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| classify_sqlx_error("Failed to fetch identity", e))
    }
}
