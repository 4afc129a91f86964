//! Landlord entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use sqlx::Postgres;
use sqlx::query_builder::Separated;
use uuid::Uuid;

use crate::ownership::{CompanyOwned, EntityKind, ScopedNew};

/// A property owner managed by a company.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Landlord {
    /// Unique landlord identifier.
    pub id: Uuid,
    /// Owning company.
    pub company_id: Uuid,
    /// Legal or display name.
    pub name: String,
    /// Contact email.
    pub email: Option<String>,
    /// Contact phone number.
    pub phone: Option<String>,
    /// When the record was created.
    pub created_at: DateTime<Utc>,
}

impl CompanyOwned for Landlord {
    const KIND: EntityKind = EntityKind::Landlord;

    fn id(&self) -> Uuid {
        self.id
    }

    fn company_id(&self) -> Uuid {
        self.company_id
    }
}

/// Payload for creating a landlord.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewLandlord {
    /// Legal or display name.
    pub name: String,
    /// Contact email.
    pub email: Option<String>,
    /// Contact phone number.
    pub phone: Option<String>,
}

impl ScopedNew for NewLandlord {
    type Entity = Landlord;

    fn columns(&self) -> &'static [&'static str] {
        &["name", "email", "phone"]
    }

    fn push_values(&self, values: &mut Separated<'_, '_, Postgres, &'static str>) {
        values.push_bind(self.name.clone());
        values.push_bind(self.email.clone());
        values.push_bind(self.phone.clone());
    }
}
