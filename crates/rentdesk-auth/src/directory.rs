//! Identity snapshot lookup.
//!
//! The manager re-derives the acting user's `company_id`/`role_id`/
//! `is_admin` on every validation instead of caching them in the session,
//! so role and company changes take effect on the next request.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;
use uuid::Uuid;

use rentdesk_core::result::AppResult;
use rentdesk_database::repositories::UserRepository;
use rentdesk_entity::user::Identity;

/// Source of authorization snapshots for validated sessions.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Fetch the current identity snapshot for a user. `None` for unknown
    /// or deactivated accounts.
    async fn identity_snapshot(&self, user_id: Uuid) -> AppResult<Option<Identity>>;
}

#[async_trait]
impl UserDirectory for UserRepository {
    async fn identity_snapshot(&self, user_id: Uuid) -> AppResult<Option<Identity>> {
        self.find_identity(user_id).await
    }
}

/// In-memory directory for single-node setups and tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryUserDirectory {
    users: Arc<Mutex<HashMap<Uuid, Identity>>>,
}

impl MemoryUserDirectory {
    /// Create an empty directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register or replace a user's identity snapshot.
    pub async fn upsert(&self, identity: Identity) {
        self.users.lock().await.insert(identity.user_id, identity);
    }

    /// Remove a user, simulating deactivation.
    pub async fn remove(&self, user_id: Uuid) {
        self.users.lock().await.remove(&user_id);
    }
}

#[async_trait]
impl UserDirectory for MemoryUserDirectory {
    async fn identity_snapshot(&self, user_id: Uuid) -> AppResult<Option<Identity>> {
        Ok(self.users.lock().await.get(&user_id).copied())
    }
}
