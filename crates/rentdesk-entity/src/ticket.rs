//! Maintenance ticket entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use sqlx::Postgres;
use sqlx::query_builder::Separated;
use uuid::Uuid;

use crate::ownership::{CompanyOwned, EntityKind, ScopedNew};

/// A maintenance or service ticket.
///
/// `status` is free text by convention: "open", "in_progress", "closed".
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Ticket {
    /// Unique ticket identifier.
    pub id: Uuid,
    /// Owning company.
    pub company_id: Uuid,
    /// The tenant who raised the ticket, if any.
    pub tenant_id: Option<Uuid>,
    /// The unit the ticket concerns, if any.
    pub unit_id: Option<Uuid>,
    /// Short summary.
    pub subject: String,
    /// Full description.
    pub description: Option<String>,
    /// Workflow status.
    pub status: String,
    /// When the ticket was created.
    pub created_at: DateTime<Utc>,
}

impl CompanyOwned for Ticket {
    const KIND: EntityKind = EntityKind::Ticket;

    fn id(&self) -> Uuid {
        self.id
    }

    fn company_id(&self) -> Uuid {
        self.company_id
    }
}

/// Payload for creating a ticket. `tenant_id`/`unit_id` references must
/// pass the guard's ownership check before the insert runs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewTicket {
    /// The tenant who raised the ticket, if any.
    pub tenant_id: Option<Uuid>,
    /// The unit the ticket concerns, if any.
    pub unit_id: Option<Uuid>,
    /// Short summary.
    pub subject: String,
    /// Full description.
    pub description: Option<String>,
}

impl ScopedNew for NewTicket {
    type Entity = Ticket;

    fn columns(&self) -> &'static [&'static str] {
        &["tenant_id", "unit_id", "subject", "description", "status"]
    }

    fn push_values(&self, values: &mut Separated<'_, '_, Postgres, &'static str>) {
        values.push_bind(self.tenant_id);
        values.push_bind(self.unit_id);
        values.push_bind(self.subject.clone());
        values.push_bind(self.description.clone());
        values.push_bind("open");
    }
}
