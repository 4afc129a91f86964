//! Rental contract entity model.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use sqlx::Postgres;
use sqlx::query_builder::Separated;
use uuid::Uuid;

use crate::ownership::{CompanyOwned, EntityKind, ScopedNew};

/// A rental contract binding a tenant to a unit.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Contract {
    /// Unique contract identifier.
    pub id: Uuid,
    /// Owning company.
    pub company_id: Uuid,
    /// The renting tenant.
    pub tenant_id: Uuid,
    /// The rented unit.
    pub unit_id: Uuid,
    /// First day of the tenancy.
    pub starts_on: NaiveDate,
    /// Last day of the tenancy; open-ended when absent.
    pub ends_on: Option<NaiveDate>,
    /// Monthly rent in cents.
    pub rent_cents: i64,
    /// Deposit in cents.
    pub deposit_cents: i64,
    /// When the record was created.
    pub created_at: DateTime<Utc>,
}

impl CompanyOwned for Contract {
    const KIND: EntityKind = EntityKind::Contract;

    fn id(&self) -> Uuid {
        self.id
    }

    fn company_id(&self) -> Uuid {
        self.company_id
    }
}

/// Payload for creating a contract. The referenced tenant and unit must
/// pass the guard's ownership check before the insert runs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewContract {
    /// The renting tenant.
    pub tenant_id: Uuid,
    /// The rented unit.
    pub unit_id: Uuid,
    /// First day of the tenancy.
    pub starts_on: NaiveDate,
    /// Last day of the tenancy; open-ended when absent.
    pub ends_on: Option<NaiveDate>,
    /// Monthly rent in cents.
    pub rent_cents: i64,
    /// Deposit in cents.
    pub deposit_cents: i64,
}

impl ScopedNew for NewContract {
    type Entity = Contract;

    fn columns(&self) -> &'static [&'static str] {
        &[
            "tenant_id",
            "unit_id",
            "starts_on",
            "ends_on",
            "rent_cents",
            "deposit_cents",
        ]
    }

    fn push_values(&self, values: &mut Separated<'_, '_, Postgres, &'static str>) {
        values.push_bind(self.tenant_id);
        values.push_bind(self.unit_id);
        values.push_bind(self.starts_on);
        values.push_bind(self.ends_on);
        values.push_bind(self.rent_cents);
        values.push_bind(self.deposit_cents);
    }
}
