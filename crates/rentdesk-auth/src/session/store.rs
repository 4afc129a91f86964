//! Session persistence interface.
//!
//! The lifecycle invariants live in the manager; this trait is the narrow
//! surface any persistence engine has to offer. Sessions are keyed by
//! token and never physically deleted; revocation and sweeping only flip
//! `is_active`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use rentdesk_core::result::AppResult;
use rentdesk_entity::session::{Session, SessionStats};

/// Persistent record of issued sessions.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Persist a newly issued session.
    async fn put(&self, session: &Session) -> AppResult<()>;

    /// Look up a session by token.
    async fn get(&self, token: &str) -> AppResult<Option<Session>>;

    /// Record activity on a session. Last-writer-wins; concurrent touches
    /// of the same token must not deadlock or corrupt the row.
    async fn touch(&self, token: &str, at: DateTime<Utc>) -> AppResult<()>;

    /// Mark one session inactive, constrained to its owner.
    ///
    /// Returns whether a session of `user_id` with this token exists. A
    /// token owned by a different user reads as `false`, identical to a
    /// nonexistent token.
    async fn deactivate_owned(&self, token: &str, user_id: Uuid) -> AppResult<bool>;

    /// Mark every active session of the user inactive, optionally keeping
    /// one. Applied as a single statement so no session escapes through a
    /// race with a concurrent validation. Returns the number revoked.
    async fn deactivate_all(&self, user_id: Uuid, except_token: Option<&str>) -> AppResult<u64>;

    /// Mark sessions past their expiry horizon inactive. Housekeeping
    /// only; validation re-checks `expires_at` itself. Returns the number
    /// swept.
    async fn sweep_expired(&self, now: DateTime<Utc>) -> AppResult<u64>;

    /// All sessions ever issued to a user, newest first.
    async fn list_for_user(&self, user_id: Uuid) -> AppResult<Vec<Session>>;

    /// Per-user total/active/expired counts at `now`.
    async fn stats_for_user(&self, user_id: Uuid, now: DateTime<Utc>) -> AppResult<SessionStats>;
}
