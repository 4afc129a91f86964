//! Company-ownership vocabulary consumed by the isolation guard.
//!
//! Every company-scoped table is enumerated in [`EntityKind`], which carries
//! the table name and the whitelist of caller-filterable columns. The guard
//! refuses any filter column outside the whitelist; `company_id` is never
//! whitelisted, so a caller cannot override the scoping predicate.

use std::fmt;

use sqlx::Postgres;
use sqlx::postgres::PgRow;
use sqlx::query_builder::Separated;
use uuid::Uuid;

/// The company-scoped entity types of the back office.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    /// A renter of a unit.
    Tenant,
    /// A property owner.
    Landlord,
    /// A rentable unit (apartment, house, parking space).
    Unit,
    /// A rental contract binding a tenant to a unit.
    Contract,
    /// A maintenance or service ticket.
    Ticket,
    /// A prospective tenant.
    Lead,
}

impl EntityKind {
    /// The backing table name. Static; never interpolated from user input.
    pub fn table(&self) -> &'static str {
        match self {
            Self::Tenant => "tenants",
            Self::Landlord => "landlords",
            Self::Unit => "units",
            Self::Contract => "contracts",
            Self::Ticket => "tickets",
            Self::Lead => "leads",
        }
    }

    /// Columns a caller may filter on in scoped list queries.
    ///
    /// `id` and `company_id` are deliberately absent: lookups by id go
    /// through `scoped_find`, and the company predicate is supplied by the
    /// guard alone.
    pub fn filterable_columns(&self) -> &'static [&'static str] {
        match self {
            Self::Tenant => &["first_name", "last_name", "email", "phone", "unit_id"],
            Self::Landlord => &["name", "email", "phone"],
            Self::Unit => &["address", "landlord_id", "rent_cents"],
            Self::Contract => &["tenant_id", "unit_id", "starts_on", "ends_on", "rent_cents"],
            Self::Ticket => &["tenant_id", "unit_id", "status", "subject"],
            Self::Lead => &["name", "email", "phone", "source", "status"],
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.table())
    }
}

/// A row type owned by a company.
///
/// Implemented by every domain entity the guard can read. The associated
/// `KIND` ties the Rust type to its table and filter whitelist.
pub trait CompanyOwned: for<'r> sqlx::FromRow<'r, PgRow> + Send + Sync + Unpin {
    /// The entity kind this row belongs to.
    const KIND: EntityKind;

    /// The row's primary key.
    fn id(&self) -> Uuid;

    /// The owning company. Immutable after creation.
    fn company_id(&self) -> Uuid;
}

/// A creation payload for a company-scoped row.
///
/// Payload types carry **no** `company_id` field, so a caller-supplied value
/// is unrepresentable; the guard stamps the requester's company itself.
/// `push_values` writes the payload columns, in `columns()` order, into the
/// insert statement's value list.
pub trait ScopedNew: Send + Sync {
    /// The entity produced by inserting this payload.
    type Entity: CompanyOwned;

    /// Column names written by `push_values`, excluding `id` and
    /// `company_id`, in bind order.
    fn columns(&self) -> &'static [&'static str];

    /// Bind the payload values into the insert statement.
    fn push_values(&self, values: &mut Separated<'_, '_, Postgres, &'static str>);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn company_id_is_never_filterable() {
        for kind in [
            EntityKind::Tenant,
            EntityKind::Landlord,
            EntityKind::Unit,
            EntityKind::Contract,
            EntityKind::Ticket,
            EntityKind::Lead,
        ] {
            assert!(!kind.filterable_columns().contains(&"company_id"));
            assert!(!kind.filterable_columns().contains(&"id"));
        }
    }
}
