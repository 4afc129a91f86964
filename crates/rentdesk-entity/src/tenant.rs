//! Tenant entity model (a renter, not to be confused with the company
//! isolation boundary).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use sqlx::Postgres;
use sqlx::query_builder::Separated;
use uuid::Uuid;

use crate::ownership::{CompanyOwned, EntityKind, ScopedNew};

/// A renter managed by a company.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Tenant {
    /// Unique tenant identifier.
    pub id: Uuid,
    /// Owning company.
    pub company_id: Uuid,
    /// First name.
    pub first_name: String,
    /// Last name.
    pub last_name: String,
    /// Contact email.
    pub email: Option<String>,
    /// Contact phone number.
    pub phone: Option<String>,
    /// The unit currently rented, if any.
    pub unit_id: Option<Uuid>,
    /// When the record was created.
    pub created_at: DateTime<Utc>,
}

impl CompanyOwned for Tenant {
    const KIND: EntityKind = EntityKind::Tenant;

    fn id(&self) -> Uuid {
        self.id
    }

    fn company_id(&self) -> Uuid {
        self.company_id
    }
}

/// Payload for creating a tenant. Carries no `company_id`; the guard stamps
/// the requester's own.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewTenant {
    /// First name.
    pub first_name: String,
    /// Last name.
    pub last_name: String,
    /// Contact email.
    pub email: Option<String>,
    /// Contact phone number.
    pub phone: Option<String>,
    /// The unit rented, if already assigned.
    pub unit_id: Option<Uuid>,
}

impl ScopedNew for NewTenant {
    type Entity = Tenant;

    fn columns(&self) -> &'static [&'static str] {
        &["first_name", "last_name", "email", "phone", "unit_id"]
    }

    fn push_values(&self, values: &mut Separated<'_, '_, Postgres, &'static str>) {
        values.push_bind(self.first_name.clone());
        values.push_bind(self.last_name.clone());
        values.push_bind(self.email.clone());
        values.push_bind(self.phone.clone());
        values.push_bind(self.unit_id);
    }
}
