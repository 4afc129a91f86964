//! Ticket service.
//!
//! Writes that link a ticket to other rows run the guard's reference
//! ownership check first, so a request cannot attach another company's
//! tenant or unit by guessing its id. The check and the insert are ordered
//! so that a failing reference leaves no partial write.

use tracing::info;
use uuid::Uuid;

use rentdesk_core::result::AppResult;
use rentdesk_core::types::filter::{FilterField, FilterValue};
use rentdesk_core::types::pagination::{PageRequest, PageResponse};
use rentdesk_database::scope::{ColumnUpdate, CompanyScope, ScopedRepository};
use rentdesk_entity::ownership::EntityKind;
use rentdesk_entity::ticket::{NewTicket, Ticket};
use rentdesk_entity::user::Identity;

/// Ticket operations under the company isolation guard.
#[derive(Debug, Clone)]
pub struct TicketService {
    repo: ScopedRepository,
}

impl TicketService {
    /// Create a new ticket service.
    pub fn new(repo: ScopedRepository) -> Self {
        Self { repo }
    }

    /// Create a ticket for the acting identity's company.
    pub async fn create(&self, identity: &Identity, payload: NewTicket) -> AppResult<Ticket> {
        let scope = CompanyScope::of(identity);

        self.repo
            .check_refs(&referenced_ids(&payload), &scope)
            .await?;

        let ticket = self.repo.create(&payload, &scope).await?;
        info!(
            ticket_id = %ticket.id,
            company_id = %ticket.company_id,
            "Ticket created"
        );
        Ok(ticket)
    }

    /// Fetch one ticket visible to the acting identity.
    pub async fn get(&self, identity: &Identity, id: Uuid) -> AppResult<Ticket> {
        self.repo.find(id, &CompanyScope::of(identity)).await
    }

    /// List tickets matching the caller's filters within their company.
    pub async fn list(
        &self,
        identity: &Identity,
        filters: &[FilterField],
        page: &PageRequest,
    ) -> AppResult<PageResponse<Ticket>> {
        self.repo
            .list(filters, page, &CompanyScope::of(identity))
            .await
    }

    /// Update whitelisted ticket columns.
    ///
    /// Re-pointing `tenant_id`/`unit_id` runs the same ownership check as
    /// creation, so an update cannot attach another company's row either.
    pub async fn update(
        &self,
        identity: &Identity,
        id: Uuid,
        changes: &[ColumnUpdate],
    ) -> AppResult<Ticket> {
        let scope = CompanyScope::of(identity);

        self.repo
            .check_refs(&referenced_updates(changes), &scope)
            .await?;

        self.repo.update(id, changes, &scope).await
    }
}

/// The foreign ids a ticket payload links to, grouped by entity kind.
fn referenced_ids(payload: &NewTicket) -> Vec<(EntityKind, Vec<Uuid>)> {
    let mut refs = Vec::new();
    if let Some(tenant_id) = payload.tenant_id {
        refs.push((EntityKind::Tenant, vec![tenant_id]));
    }
    if let Some(unit_id) = payload.unit_id {
        refs.push((EntityKind::Unit, vec![unit_id]));
    }
    refs
}

/// The foreign ids an update assigns to link columns, grouped by entity
/// kind. Setting a column to null links nothing and needs no check.
fn referenced_updates(changes: &[ColumnUpdate]) -> Vec<(EntityKind, Vec<Uuid>)> {
    let mut refs = Vec::new();
    for change in changes {
        if let FilterValue::Uuid(id) = change.value {
            match change.column.as_str() {
                "tenant_id" => refs.push((EntityKind::Tenant, vec![id])),
                "unit_id" => refs.push((EntityKind::Unit, vec![id])),
                _ => {}
            }
        }
    }
    refs
}
