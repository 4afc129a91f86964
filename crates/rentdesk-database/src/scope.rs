//! Company isolation guard.
//!
//! Every read and write against a company-scoped table goes through
//! [`ScopedRepository`]. The company predicate is fused into the same SQL
//! statement as the primary-key or filter predicates; there is no
//! fetch-then-check path, and no method that takes a raw company id. A
//! [`CompanyScope`] can only be built from a validated [`Identity`], so an
//! unscoped query is not expressible by a caller.

use sqlx::postgres::PgPool;
use sqlx::{Postgres, QueryBuilder};
use tracing::warn;
use uuid::Uuid;

use rentdesk_core::AppError;
use rentdesk_core::result::AppResult;
use rentdesk_core::types::filter::{FilterField, FilterValue};
use rentdesk_core::types::pagination::{PageRequest, PageResponse};
use rentdesk_entity::ownership::{CompanyOwned, EntityKind, ScopedNew};
use rentdesk_entity::user::Identity;

/// The scoping predicate for one request.
///
/// Derived fresh from the caller's validated identity on every request;
/// never cached across requests.
#[derive(Debug, Clone, Copy)]
pub struct CompanyScope {
    company_id: Uuid,
    user_id: Uuid,
}

impl CompanyScope {
    /// Build the scope for a validated identity. This is the only
    /// constructor.
    pub fn of(identity: &Identity) -> Self {
        Self {
            company_id: identity.company_id,
            user_id: identity.user_id,
        }
    }

    /// The company every query under this scope is constrained to.
    pub fn company_id(&self) -> Uuid {
        self.company_id
    }

    /// The acting user, for audit logging.
    pub fn user_id(&self) -> Uuid {
        self.user_id
    }
}

/// A single column assignment for a scoped update.
#[derive(Debug, Clone)]
pub struct ColumnUpdate {
    /// The column to assign. Must be on the entity's filterable whitelist.
    pub column: String,
    /// The new value.
    pub value: FilterValue,
}

impl ColumnUpdate {
    /// Create a new column assignment.
    pub fn new(column: impl Into<String>, value: FilterValue) -> Self {
        Self {
            column: column.into(),
            value,
        }
    }
}

/// Repository applying the company predicate to every operation.
#[derive(Debug, Clone)]
pub struct ScopedRepository {
    pool: PgPool,
}

impl ScopedRepository {
    /// Create a new scoped repository over the shared pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Fetch one row by primary key, constrained to the scope's company.
    ///
    /// A row that exists but belongs to another company yields the same
    /// `NotFound` as a missing row.
    pub async fn find<E: CompanyOwned>(&self, id: Uuid, scope: &CompanyScope) -> AppResult<E> {
        let row = sqlx::query_as::<_, E>(&find_sql(E::KIND))
            .bind(id)
            .bind(scope.company_id())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| crate::classify_sqlx_error("Failed to fetch scoped row", e))?;

        row.ok_or_else(|| {
            AppError::not_found().with_detail(format!(
                "{} {id} not visible to company {}",
                E::KIND,
                scope.company_id()
            ))
        })
    }

    /// List rows matching caller filters, constrained to the scope's
    /// company.
    ///
    /// Filters are validated against the entity's column whitelist and
    /// merged with the company predicate, never replacing it.
    pub async fn list<E: CompanyOwned + serde::Serialize>(
        &self,
        filters: &[FilterField],
        page: &PageRequest,
        scope: &CompanyScope,
    ) -> AppResult<PageResponse<E>> {
        validate_filters(E::KIND, filters)?;

        let mut count_query = build_count_query(E::KIND, filters, scope);
        let total: i64 = count_query
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await
            .map_err(|e| crate::classify_sqlx_error("Failed to count scoped rows", e))?;

        let mut list_query = build_list_query(E::KIND, filters, page, scope);
        let items = list_query
            .build_query_as::<E>()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| crate::classify_sqlx_error("Failed to list scoped rows", e))?;

        Ok(PageResponse::new(
            items,
            page.page.max(1),
            page.limit(),
            total as u64,
        ))
    }

    /// Insert a new row stamped with the scope's company.
    ///
    /// The payload type has no `company_id` field; the guard binds
    /// `scope.company_id()` itself, so a caller-supplied value cannot win.
    pub async fn create<P: ScopedNew>(
        &self,
        payload: &P,
        scope: &CompanyScope,
    ) -> AppResult<P::Entity> {
        let id = Uuid::new_v4();
        let mut query = build_insert_query(payload, id, scope);
        query
            .build_query_as::<P::Entity>()
            .fetch_one(&self.pool)
            .await
            .map_err(|e| crate::classify_sqlx_error("Failed to insert scoped row", e))
    }

    /// Update whitelisted columns of one row, constrained to the scope's
    /// company. A foreign row yields `NotFound`, identical to a missing one.
    pub async fn update<E: CompanyOwned>(
        &self,
        id: Uuid,
        changes: &[ColumnUpdate],
        scope: &CompanyScope,
    ) -> AppResult<E> {
        if changes.is_empty() {
            return Err(AppError::validation("No columns to update"));
        }
        for change in changes {
            if !E::KIND.filterable_columns().contains(&change.column.as_str()) {
                return Err(AppError::validation(format!(
                    "Column '{}' cannot be updated on {}",
                    change.column,
                    E::KIND
                )));
            }
        }

        let mut query = build_update_query(E::KIND, id, changes, scope);
        let row = query
            .build_query_as::<E>()
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| crate::classify_sqlx_error("Failed to update scoped row", e))?;

        row.ok_or_else(|| {
            AppError::not_found().with_detail(format!(
                "{} {id} not visible to company {}",
                E::KIND,
                scope.company_id()
            ))
        })
    }

    /// Delete one row, constrained to the scope's company.
    pub async fn delete(&self, kind: EntityKind, id: Uuid, scope: &CompanyScope) -> AppResult<()> {
        let result = sqlx::query(&delete_sql(kind))
            .bind(id)
            .bind(scope.company_id())
            .execute(&self.pool)
            .await
            .map_err(|e| crate::classify_sqlx_error("Failed to delete scoped row", e))?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found().with_detail(format!(
                "{kind} {id} not visible to company {}",
                scope.company_id()
            )));
        }
        Ok(())
    }

    /// Verify that every referenced foreign id resolves to a row owned by
    /// the scope's company.
    ///
    /// Called before a write that links rows together; one foreign or
    /// missing id rejects the whole write, so nothing is partially applied.
    pub async fn check_refs(
        &self,
        refs: &[(EntityKind, Vec<Uuid>)],
        scope: &CompanyScope,
    ) -> AppResult<()> {
        for (kind, ids) in refs {
            let mut distinct = ids.clone();
            distinct.sort();
            distinct.dedup();
            if distinct.is_empty() {
                continue;
            }

            let owned: i64 = sqlx::query_scalar(&ref_count_sql(*kind))
                .bind(&distinct)
                .bind(scope.company_id())
                .fetch_one(&self.pool)
                .await
                .map_err(|e| crate::classify_sqlx_error("Failed to check reference ownership", e))?;

            verify_ref_count(*kind, &distinct, owned, scope)?;
        }
        Ok(())
    }
}

/// Pure ownership verdict for a batch reference check.
fn verify_ref_count(
    kind: EntityKind,
    distinct_ids: &[Uuid],
    owned: i64,
    scope: &CompanyScope,
) -> AppResult<()> {
    if owned == distinct_ids.len() as i64 {
        return Ok(());
    }
    warn!(
        entity = %kind,
        expected = distinct_ids.len(),
        owned = owned,
        company_id = %scope.company_id(),
        user_id = %scope.user_id(),
        "Reference ownership check failed"
    );
    Err(AppError::forbidden("referenced resource is not accessible").with_detail(format!(
        "{} of {} referenced {kind} ids owned by company {}",
        owned,
        distinct_ids.len(),
        scope.company_id()
    )))
}

fn find_sql(kind: EntityKind) -> String {
    format!(
        "SELECT * FROM {} WHERE id = $1 AND company_id = $2",
        kind.table()
    )
}

fn delete_sql(kind: EntityKind) -> String {
    format!(
        "DELETE FROM {} WHERE id = $1 AND company_id = $2",
        kind.table()
    )
}

fn ref_count_sql(kind: EntityKind) -> String {
    format!(
        "SELECT COUNT(*) FROM {} WHERE id = ANY($1) AND company_id = $2",
        kind.table()
    )
}

/// Reject filters naming columns outside the entity's whitelist, or a null
/// value with a value-taking operator.
fn validate_filters(kind: EntityKind, filters: &[FilterField]) -> AppResult<()> {
    for filter in filters {
        if !kind.filterable_columns().contains(&filter.field.as_str()) {
            return Err(AppError::validation(format!(
                "Column '{}' cannot be filtered on {kind}",
                filter.field
            )));
        }
        if filter.op.takes_value() && filter.value == FilterValue::Null {
            return Err(AppError::validation(format!(
                "Filter on '{}' requires a value",
                filter.field
            )));
        }
    }
    Ok(())
}

/// Push `WHERE company_id = $1 [AND <filter>]...` onto a builder.
///
/// The company predicate comes first and unconditionally; caller filters
/// can only narrow it. Assumes `validate_filters` has already passed.
fn push_predicates(
    qb: &mut QueryBuilder<'_, Postgres>,
    filters: &[FilterField],
    scope: &CompanyScope,
) {
    qb.push(" WHERE company_id = ");
    qb.push_bind(scope.company_id());

    for filter in filters {
        qb.push(" AND ");
        qb.push(filter.field.as_str());
        if filter.op.takes_value() {
            qb.push(" ");
            qb.push(filter.op.sql());
            qb.push(" ");
            match &filter.value {
                FilterValue::Uuid(u) => {
                    qb.push_bind(*u);
                }
                FilterValue::String(s) => {
                    qb.push_bind(s.clone());
                }
                FilterValue::Integer(i) => {
                    qb.push_bind(*i);
                }
                FilterValue::Boolean(b) => {
                    qb.push_bind(*b);
                }
                FilterValue::Null => unreachable!("rejected by validate_filters"),
            }
        } else {
            qb.push(" ");
            qb.push(filter.op.sql());
        }
    }
}

fn build_count_query(
    kind: EntityKind,
    filters: &[FilterField],
    scope: &CompanyScope,
) -> QueryBuilder<'static, Postgres> {
    let mut qb = QueryBuilder::new(format!("SELECT COUNT(*) FROM {}", kind.table()));
    push_predicates(&mut qb, filters, scope);
    qb
}

fn build_list_query(
    kind: EntityKind,
    filters: &[FilterField],
    page: &PageRequest,
    scope: &CompanyScope,
) -> QueryBuilder<'static, Postgres> {
    let mut qb = QueryBuilder::new(format!("SELECT * FROM {}", kind.table()));
    push_predicates(&mut qb, filters, scope);
    qb.push(" ORDER BY created_at DESC LIMIT ");
    qb.push_bind(page.limit() as i64);
    qb.push(" OFFSET ");
    qb.push_bind(page.offset() as i64);
    qb
}

fn build_insert_query<P: ScopedNew>(
    payload: &P,
    id: Uuid,
    scope: &CompanyScope,
) -> QueryBuilder<'static, Postgres> {
    let mut qb = QueryBuilder::new(format!(
        "INSERT INTO {} (id, company_id",
        P::Entity::KIND.table()
    ));
    for column in payload.columns() {
        qb.push(", ");
        qb.push(*column);
    }
    qb.push(") VALUES (");
    let mut values = qb.separated(", ");
    values.push_bind(id);
    values.push_bind(scope.company_id());
    payload.push_values(&mut values);
    qb.push(") RETURNING *");
    qb
}

fn build_update_query(
    kind: EntityKind,
    id: Uuid,
    changes: &[ColumnUpdate],
    scope: &CompanyScope,
) -> QueryBuilder<'static, Postgres> {
    let mut qb = QueryBuilder::new(format!("UPDATE {} SET ", kind.table()));
    let mut first = true;
    for change in changes {
        if !first {
            qb.push(", ");
        }
        first = false;
        qb.push(change.column.as_str());
        qb.push(" = ");
        match &change.value {
            FilterValue::Uuid(u) => {
                qb.push_bind(*u);
            }
            FilterValue::String(s) => {
                qb.push_bind(s.clone());
            }
            FilterValue::Integer(i) => {
                qb.push_bind(*i);
            }
            FilterValue::Boolean(b) => {
                qb.push_bind(*b);
            }
            FilterValue::Null => {
                qb.push("NULL");
            }
        }
    }
    qb.push(" WHERE id = ");
    qb.push_bind(id);
    qb.push(" AND company_id = ");
    qb.push_bind(scope.company_id());
    qb.push(" RETURNING *");
    qb
}

#[cfg(test)]
mod tests {
    use super::*;
    use rentdesk_core::ErrorKind;
    use rentdesk_core::types::filter::FilterOp;
    use rentdesk_entity::tenant::NewTenant;

    fn scope() -> CompanyScope {
        CompanyScope::of(&Identity {
            user_id: Uuid::new_v4(),
            company_id: Uuid::new_v4(),
            role_id: Uuid::new_v4(),
            is_admin: false,
        })
    }

    #[test]
    fn find_fuses_id_and_company_in_one_predicate() {
        let sql = find_sql(EntityKind::Ticket);
        assert_eq!(
            sql,
            "SELECT * FROM tickets WHERE id = $1 AND company_id = $2"
        );
    }

    #[test]
    fn list_query_always_carries_company_predicate() {
        let filters = vec![FilterField::eq("status", "open")];
        let mut qb = build_list_query(
            EntityKind::Ticket,
            &filters,
            &PageRequest::default(),
            &scope(),
        );
        let sql = qb.sql();
        assert!(sql.starts_with("SELECT * FROM tickets WHERE company_id = $1"));
        assert!(sql.contains("AND status = $2"));
    }

    #[test]
    fn empty_filters_still_scope_by_company() {
        let mut qb = build_count_query(EntityKind::Lead, &[], &scope());
        assert_eq!(qb.sql(), "SELECT COUNT(*) FROM leads WHERE company_id = $1");
    }

    #[test]
    fn company_id_filter_is_rejected() {
        let filters = vec![FilterField::eq("company_id", "anything")];
        let err = validate_filters(EntityKind::Ticket, &filters).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
    }

    #[test]
    fn unknown_column_is_rejected() {
        let filters = vec![FilterField::eq("password", "x")];
        assert!(validate_filters(EntityKind::Tenant, &filters).is_err());
    }

    #[test]
    fn null_checks_bind_no_value() {
        let filters = vec![FilterField::new(
            "unit_id",
            FilterOp::IsNull,
            FilterValue::Null,
        )];
        validate_filters(EntityKind::Tenant, &filters).unwrap();
        let mut qb = build_count_query(EntityKind::Tenant, &filters, &scope());
        assert_eq!(
            qb.sql(),
            "SELECT COUNT(*) FROM tenants WHERE company_id = $1 AND unit_id IS NULL"
        );
    }

    #[test]
    fn uuid_filters_on_foreign_key_columns_bind_as_uuid() {
        let tenant_id = Uuid::new_v4();
        let filters = vec![FilterField::eq_uuid("tenant_id", tenant_id)];
        validate_filters(EntityKind::Ticket, &filters).unwrap();
        let mut qb = build_count_query(EntityKind::Ticket, &filters, &scope());
        assert_eq!(
            qb.sql(),
            "SELECT COUNT(*) FROM tickets WHERE company_id = $1 AND tenant_id = $2"
        );
    }

    #[test]
    fn uuid_updates_on_foreign_key_columns_bind_as_uuid() {
        let changes = vec![ColumnUpdate::new(
            "tenant_id",
            FilterValue::Uuid(Uuid::new_v4()),
        )];
        let mut qb = build_update_query(EntityKind::Ticket, Uuid::new_v4(), &changes, &scope());
        let sql = qb.sql();
        assert!(
            sql.starts_with("UPDATE tickets SET tenant_id = $1 WHERE id = $2 AND company_id = $3")
        );
    }

    #[test]
    fn insert_stamps_guard_company_first() {
        let payload = NewTenant {
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            email: None,
            phone: None,
            unit_id: None,
        };
        let mut qb = build_insert_query(&payload, Uuid::new_v4(), &scope());
        let sql = qb.sql();
        assert!(sql.starts_with(
            "INSERT INTO tenants (id, company_id, first_name, last_name, email, phone, unit_id) \
             VALUES ($1, $2, $3, $4, $5, $6, $7)"
        ));
        assert!(sql.ends_with("RETURNING *"));
    }

    #[test]
    fn update_keeps_company_in_where_clause() {
        let changes = vec![ColumnUpdate::new(
            "status",
            FilterValue::String("closed".into()),
        )];
        let mut qb = build_update_query(EntityKind::Ticket, Uuid::new_v4(), &changes, &scope());
        let sql = qb.sql();
        assert!(sql.starts_with("UPDATE tickets SET status = $1 WHERE id = $2 AND company_id = $3"));
    }

    #[test]
    fn ref_check_requires_every_id_owned() {
        let s = scope();
        let ids = vec![Uuid::new_v4(), Uuid::new_v4()];
        assert!(verify_ref_count(EntityKind::Unit, &ids, 2, &s).is_ok());
        let err = verify_ref_count(EntityKind::Unit, &ids, 1, &s).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Forbidden);
    }
}
