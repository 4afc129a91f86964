//! User entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::status::UserStatus;

/// A back-office user account. Every user belongs to exactly one company.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    /// Unique user identifier.
    pub id: Uuid,
    /// The company (tenant boundary) this user belongs to.
    pub company_id: Uuid,
    /// The user's role.
    pub role_id: Uuid,
    /// Whether the user has administrative rights within their company.
    pub is_admin: bool,
    /// Login email, unique.
    pub email: String,
    /// Display name.
    pub display_name: String,
    /// Account status.
    pub status: UserStatus,
    /// When the account was created.
    pub created_at: DateTime<Utc>,
}
