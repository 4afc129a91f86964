//! Company entity model. The company is the isolation boundary: every
//! domain row and every identity belongs to exactly one company.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A customer company (tenant of the platform).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Company {
    /// Unique company identifier.
    pub id: Uuid,
    /// Company display name.
    pub name: String,
    /// When the company was onboarded.
    pub created_at: DateTime<Utc>,
}
