//! The identity resolved from a live session.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A snapshot sufficient to authorize one request.
///
/// Re-derived from the user row on every validation rather than cached in
/// the session, so role or company changes take effect on the next request
/// without forcing re-login.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Identity {
    /// The acting user.
    pub user_id: Uuid,
    /// The company every data access under this identity is scoped to.
    pub company_id: Uuid,
    /// The user's role at validation time.
    pub role_id: Uuid,
    /// Whether the user has administrative rights within their company.
    pub is_admin: bool,
}
