//! Session entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A server-side session binding a bearer token to a user for a bounded
/// time window.
///
/// Sessions are created on login and marked inactive on logout, revocation,
/// or by the expiry sweep. Rows are never deleted; revoked sessions remain
/// for audit.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Session {
    /// Opaque bearer token, unique per session. Cryptographically random.
    pub token: String,
    /// The user this session belongs to. A user may hold many sessions.
    pub user_id: Uuid,
    /// When the session was issued (login time).
    pub issued_at: DateTime<Utc>,
    /// Absolute expiry, fixed at issuance. Activity does not extend it.
    pub expires_at: DateTime<Utc>,
    /// Last successful validation. Observability only; never affects
    /// liveness.
    pub last_activity_at: DateTime<Utc>,
    /// False once revoked or swept. Terminal; there is no way back.
    pub is_active: bool,
    /// IP address at issuance. Write-once.
    pub ip_address: Option<String>,
    /// User-Agent header value at issuance. Write-once.
    pub user_agent: Option<String>,
    /// Device class ("desktop", "mobile", ...). Write-once.
    pub device_type: Option<String>,
    /// Human-readable device name. Write-once.
    pub device_name: Option<String>,
}

impl Session {
    /// Whether the session is live at `now`.
    ///
    /// Liveness is a pure function of `(is_active, expires_at, now)` and is
    /// never stored, so a stored flag cannot drift against the wall clock.
    pub fn is_live(&self, now: DateTime<Utc>) -> bool {
        self.is_active && now < self.expires_at
    }

    /// Whether the session has passed its expiry horizon at `now`.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

/// Write-once provenance metadata captured at issuance.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionProvenance {
    /// IP address of the client.
    pub ip_address: Option<String>,
    /// User-Agent header value.
    pub user_agent: Option<String>,
    /// Device class ("desktop", "mobile", ...).
    pub device_type: Option<String>,
    /// Human-readable device name.
    pub device_name: Option<String>,
}

/// Per-user session counts for listing/statistics views.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SessionStats {
    /// All sessions ever issued to the user.
    pub total: u64,
    /// Sessions that are live right now.
    pub active: u64,
    /// Sessions past their expiry horizon (whether or not swept yet).
    pub expired: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn session(is_active: bool, expires_in: Duration) -> Session {
        let now = Utc::now();
        Session {
            token: "t".into(),
            user_id: Uuid::new_v4(),
            issued_at: now,
            expires_at: now + expires_in,
            last_activity_at: now,
            is_active,
            ip_address: None,
            user_agent: None,
            device_type: None,
            device_name: None,
        }
    }

    #[test]
    fn live_requires_active_and_unexpired() {
        let now = Utc::now();
        assert!(session(true, Duration::days(7)).is_live(now));
        assert!(!session(false, Duration::days(7)).is_live(now));
        assert!(!session(true, Duration::seconds(-1)).is_live(now));
    }

    #[test]
    fn liveness_ignores_last_activity() {
        let mut s = session(true, Duration::days(7));
        let now = Utc::now();
        let before = s.is_live(now);
        s.last_activity_at = now - Duration::days(30);
        assert_eq!(before, s.is_live(now));
    }

    #[test]
    fn expiry_is_observed_lazily() {
        let s = session(true, Duration::days(7));
        assert!(s.is_live(s.issued_at + Duration::days(6)));
        assert!(!s.is_live(s.issued_at + Duration::days(8)));
    }
}
