//! Session lifecycle tests over the in-memory backends.

use std::sync::Arc;

use chrono::{Duration, Utc};
use uuid::Uuid;

use rentdesk_auth::directory::MemoryUserDirectory;
use rentdesk_auth::session::{MemorySessionStore, SessionManager, SessionStore, SessionSweeper};
use rentdesk_core::ErrorKind;
use rentdesk_core::config::session::SessionConfig;
use rentdesk_entity::session::{Session, SessionProvenance};
use rentdesk_entity::user::Identity;

struct Harness {
    store: Arc<MemorySessionStore>,
    directory: Arc<MemoryUserDirectory>,
    manager: SessionManager,
}

fn harness() -> Harness {
    let store = Arc::new(MemorySessionStore::new());
    let directory = Arc::new(MemoryUserDirectory::new());
    let manager = SessionManager::new(
        store.clone(),
        directory.clone(),
        SessionConfig::default(),
    );
    Harness {
        store,
        directory,
        manager,
    }
}

fn identity(company_id: Uuid) -> Identity {
    Identity {
        user_id: Uuid::new_v4(),
        company_id,
        role_id: Uuid::new_v4(),
        is_admin: false,
    }
}

async fn registered_user(h: &Harness) -> Identity {
    let id = identity(Uuid::new_v4());
    h.directory.upsert(id).await;
    id
}

#[tokio::test]
async fn issued_session_validates_to_current_identity() {
    let h = harness();
    let id = registered_user(&h).await;

    let session = h
        .manager
        .issue(id.user_id, SessionProvenance::default())
        .await
        .unwrap();

    let resolved = h.manager.validate(&session.token).await.unwrap();
    assert_eq!(resolved, id);
}

#[tokio::test]
async fn identity_reflects_company_change_without_relogin() {
    let h = harness();
    let mut id = registered_user(&h).await;
    let session = h
        .manager
        .issue(id.user_id, SessionProvenance::default())
        .await
        .unwrap();

    id.company_id = Uuid::new_v4();
    h.directory.upsert(id).await;

    let resolved = h.manager.validate(&session.token).await.unwrap();
    assert_eq!(resolved.company_id, id.company_id);
}

#[tokio::test]
async fn unknown_token_is_unauthenticated() {
    let h = harness();
    let err = h.manager.validate("no-such-token").await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::Unauthenticated);
}

#[tokio::test]
async fn expired_session_fails_like_unknown_token() {
    let h = harness();
    let id = registered_user(&h).await;
    let session = h
        .manager
        .issue_with_ttl(id.user_id, SessionProvenance::default(), 0)
        .await
        .unwrap();

    let expired_err = h.manager.validate(&session.token).await.unwrap_err();
    let unknown_err = h.manager.validate("no-such-token").await.unwrap_err();
    assert_eq!(expired_err.kind, ErrorKind::Unauthenticated);
    // Indistinguishable to the caller.
    assert_eq!(expired_err.message, unknown_err.message);
}

#[tokio::test]
async fn validation_touches_last_activity() {
    let h = harness();
    let id = registered_user(&h).await;
    let session = h
        .manager
        .issue(id.user_id, SessionProvenance::default())
        .await
        .unwrap();

    let before = h.store.get(&session.token).await.unwrap().unwrap();
    tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    h.manager.validate(&session.token).await.unwrap();
    let after = h.store.get(&session.token).await.unwrap().unwrap();

    assert!(after.last_activity_at > before.last_activity_at);
    assert_eq!(after.expires_at, before.expires_at);
}

#[tokio::test]
async fn revoked_session_never_validates_again() {
    let h = harness();
    let id = registered_user(&h).await;
    let session = h
        .manager
        .issue(id.user_id, SessionProvenance::default())
        .await
        .unwrap();

    h.manager
        .revoke_one(&session.token, id.user_id)
        .await
        .unwrap();

    for _ in 0..2 {
        let err = h.manager.validate(&session.token).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Unauthenticated);
    }

    // Revoking an owned, already-revoked session stays a no-op Ok.
    h.manager
        .revoke_one(&session.token, id.user_id)
        .await
        .unwrap();
}

#[tokio::test]
async fn foreign_session_revocation_fails_like_nonexistent() {
    let h = harness();
    let owner = registered_user(&h).await;
    let other = registered_user(&h).await;
    let session = h
        .manager
        .issue(owner.user_id, SessionProvenance::default())
        .await
        .unwrap();

    let foreign = h
        .manager
        .revoke_one(&session.token, other.user_id)
        .await
        .unwrap_err();
    let missing = h
        .manager
        .revoke_one("no-such-token", other.user_id)
        .await
        .unwrap_err();

    assert_eq!(foreign.kind, ErrorKind::NotFound);
    assert_eq!(foreign.message, missing.message);

    // The owner's session is untouched.
    h.manager.validate(&session.token).await.unwrap();
}

#[tokio::test]
async fn two_devices_revoke_all_except_current() {
    let h = harness();
    let id = registered_user(&h).await;

    let device1 = h
        .manager
        .issue(
            id.user_id,
            SessionProvenance {
                device_name: Some("laptop".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    let device2 = h
        .manager
        .issue(
            id.user_id,
            SessionProvenance {
                device_name: Some("phone".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    let revoked = h
        .manager
        .revoke_all(id.user_id, Some(&device1.token))
        .await
        .unwrap();
    assert_eq!(revoked, 1);

    h.manager.validate(&device1.token).await.unwrap();
    let err = h.manager.validate(&device2.token).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::Unauthenticated);

    // Second call is a no-op.
    let again = h
        .manager
        .revoke_all(id.user_id, Some(&device1.token))
        .await
        .unwrap();
    assert_eq!(again, 0);
}

#[tokio::test]
async fn revoke_all_does_not_cross_users() {
    let h = harness();
    let u1 = registered_user(&h).await;
    let u2 = registered_user(&h).await;
    let s1 = h
        .manager
        .issue(u1.user_id, SessionProvenance::default())
        .await
        .unwrap();
    let s2 = h
        .manager
        .issue(u2.user_id, SessionProvenance::default())
        .await
        .unwrap();

    h.manager.revoke_all(u1.user_id, None).await.unwrap();

    assert!(h.manager.validate(&s1.token).await.is_err());
    h.manager.validate(&s2.token).await.unwrap();
}

#[tokio::test]
async fn deactivated_user_fails_validation() {
    let h = harness();
    let id = registered_user(&h).await;
    let session = h
        .manager
        .issue(id.user_id, SessionProvenance::default())
        .await
        .unwrap();

    h.directory.remove(id.user_id).await;

    let err = h.manager.validate(&session.token).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::Unauthenticated);
}

#[tokio::test]
async fn sweep_marks_expired_sessions_inactive() {
    let h = harness();
    let user_id = Uuid::new_v4();
    let now = Utc::now();

    // One live, one past its horizon but still flagged active.
    let live = Session {
        token: "live".into(),
        user_id,
        issued_at: now,
        expires_at: now + Duration::days(7),
        last_activity_at: now,
        is_active: true,
        ip_address: None,
        user_agent: None,
        device_type: None,
        device_name: None,
    };
    let stale = Session {
        token: "stale".into(),
        expires_at: now - Duration::days(1),
        issued_at: now - Duration::days(8),
        ..live.clone()
    };
    h.store.put(&live).await.unwrap();
    h.store.put(&stale).await.unwrap();

    let sweeper = SessionSweeper::new(h.store.clone());
    assert_eq!(sweeper.run_sweep().await.unwrap(), 1);
    // Idempotent.
    assert_eq!(sweeper.run_sweep().await.unwrap(), 0);

    let stats = h.store.stats_for_user(user_id, Utc::now()).await.unwrap();
    assert_eq!(stats.total, 2);
    assert_eq!(stats.active, 1);
    assert_eq!(stats.expired, 1);
}

#[tokio::test]
async fn provenance_is_recorded_at_issuance() {
    let h = harness();
    let id = registered_user(&h).await;
    let session = h
        .manager
        .issue(
            id.user_id,
            SessionProvenance {
                ip_address: Some("203.0.113.9".into()),
                user_agent: Some("Mozilla/5.0".into()),
                device_type: Some("mobile".into()),
                device_name: Some("Pixel".into()),
            },
        )
        .await
        .unwrap();

    let stored = h.store.get(&session.token).await.unwrap().unwrap();
    assert_eq!(stored.ip_address.as_deref(), Some("203.0.113.9"));
    assert_eq!(stored.device_type.as_deref(), Some("mobile"));

    let listed = h.store.list_for_user(id.user_id).await.unwrap();
    assert_eq!(listed.len(), 1);
}
