//! Lead (prospective tenant) entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use sqlx::Postgres;
use sqlx::query_builder::Separated;
use uuid::Uuid;

use crate::ownership::{CompanyOwned, EntityKind, ScopedNew};

/// A prospective tenant.
///
/// `status` is free text by convention: "new", "contacted", "converted",
/// "lost".
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Lead {
    /// Unique lead identifier.
    pub id: Uuid,
    /// Owning company.
    pub company_id: Uuid,
    /// Full name.
    pub name: String,
    /// Contact email.
    pub email: Option<String>,
    /// Contact phone number.
    pub phone: Option<String>,
    /// Acquisition channel ("portal", "referral", ...).
    pub source: Option<String>,
    /// Pipeline status.
    pub status: String,
    /// When the lead was captured.
    pub created_at: DateTime<Utc>,
}

impl CompanyOwned for Lead {
    const KIND: EntityKind = EntityKind::Lead;

    fn id(&self) -> Uuid {
        self.id
    }

    fn company_id(&self) -> Uuid {
        self.company_id
    }
}

/// Payload for creating a lead.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewLead {
    /// Full name.
    pub name: String,
    /// Contact email.
    pub email: Option<String>,
    /// Contact phone number.
    pub phone: Option<String>,
    /// Acquisition channel ("portal", "referral", ...).
    pub source: Option<String>,
}

impl ScopedNew for NewLead {
    type Entity = Lead;

    fn columns(&self) -> &'static [&'static str] {
        &["name", "email", "phone", "source", "status"]
    }

    fn push_values(&self, values: &mut Separated<'_, '_, Postgres, &'static str>) {
        values.push_bind(self.name.clone());
        values.push_bind(self.email.clone());
        values.push_bind(self.phone.clone());
        values.push_bind(self.source.clone());
        values.push_bind("new");
    }
}
