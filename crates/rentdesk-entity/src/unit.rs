//! Rentable unit entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use sqlx::Postgres;
use sqlx::query_builder::Separated;
use uuid::Uuid;

use crate::ownership::{CompanyOwned, EntityKind, ScopedNew};

/// A rentable unit (apartment, house, parking space).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Unit {
    /// Unique unit identifier.
    pub id: Uuid,
    /// Owning company.
    pub company_id: Uuid,
    /// The landlord who owns the property, if recorded.
    pub landlord_id: Option<Uuid>,
    /// Street address.
    pub address: String,
    /// Monthly rent in cents.
    pub rent_cents: i64,
    /// When the record was created.
    pub created_at: DateTime<Utc>,
}

impl CompanyOwned for Unit {
    const KIND: EntityKind = EntityKind::Unit;

    fn id(&self) -> Uuid {
        self.id
    }

    fn company_id(&self) -> Uuid {
        self.company_id
    }
}

/// Payload for creating a unit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewUnit {
    /// The landlord who owns the property, if recorded.
    pub landlord_id: Option<Uuid>,
    /// Street address.
    pub address: String,
    /// Monthly rent in cents.
    pub rent_cents: i64,
}

impl ScopedNew for NewUnit {
    type Entity = Unit;

    fn columns(&self) -> &'static [&'static str] {
        &["landlord_id", "address", "rent_cents"]
    }

    fn push_values(&self, values: &mut Separated<'_, '_, Postgres, &'static str>) {
        values.push_bind(self.landlord_id);
        values.push_bind(self.address.clone());
        values.push_bind(self.rent_cents);
    }
}
