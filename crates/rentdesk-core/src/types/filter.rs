//! Filter types for dynamic query building.
//!
//! Callers express list filters with this vocabulary; the isolation guard
//! validates every field against a per-entity whitelist before any SQL is
//! built, so a filter can narrow a scoped query but never widen it.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Filter comparison operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterOp {
    /// Exact equality.
    Eq,
    /// Not equal.
    Ne,
    /// Greater than.
    Gt,
    /// Greater than or equal.
    Gte,
    /// Less than.
    Lt,
    /// Less than or equal.
    Lte,
    /// SQL `ILIKE` case-insensitive pattern match.
    ILike,
    /// SQL `IS NULL` check.
    IsNull,
    /// SQL `IS NOT NULL` check.
    IsNotNull,
}

impl FilterOp {
    /// The SQL operator text, without operands.
    pub fn sql(&self) -> &'static str {
        match self {
            Self::Eq => "=",
            Self::Ne => "<>",
            Self::Gt => ">",
            Self::Gte => ">=",
            Self::Lt => "<",
            Self::Lte => "<=",
            Self::ILike => "ILIKE",
            Self::IsNull => "IS NULL",
            Self::IsNotNull => "IS NOT NULL",
        }
    }

    /// Whether the operator takes a right-hand value.
    pub fn takes_value(&self) -> bool {
        !matches!(self, Self::IsNull | Self::IsNotNull)
    }
}

/// A dynamic filter value.
///
/// `Uuid` is listed before `String` so an untagged uuid-shaped value
/// deserializes as a uuid, matching the type of the foreign-key columns
/// it is compared against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterValue {
    /// A UUID value, for primary/foreign-key columns.
    Uuid(Uuid),
    /// A string value.
    String(String),
    /// An integer value.
    Integer(i64),
    /// A boolean value.
    Boolean(bool),
    /// Null / no value (for `IS NULL`, `IS NOT NULL`).
    Null,
}

/// A single filter condition on a named field.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilterField {
    /// The column name to filter on.
    pub field: String,
    /// The comparison operator.
    pub op: FilterOp,
    /// The value to compare against.
    pub value: FilterValue,
}

impl FilterField {
    /// Create a new filter field.
    pub fn new(field: impl Into<String>, op: FilterOp, value: FilterValue) -> Self {
        Self {
            field: field.into(),
            op,
            value,
        }
    }

    /// Shorthand for an equality filter on a string column.
    pub fn eq(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(field, FilterOp::Eq, FilterValue::String(value.into()))
    }

    /// Shorthand for a case-insensitive LIKE filter.
    pub fn ilike(field: impl Into<String>, pattern: impl Into<String>) -> Self {
        Self::new(field, FilterOp::ILike, FilterValue::String(pattern.into()))
    }

    /// Shorthand for an equality filter on a uuid column.
    pub fn eq_uuid(field: impl Into<String>, value: Uuid) -> Self {
        Self::new(field, FilterOp::Eq, FilterValue::Uuid(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_operators_take_no_value() {
        assert!(!FilterOp::IsNull.takes_value());
        assert!(!FilterOp::IsNotNull.takes_value());
        assert!(FilterOp::Eq.takes_value());
    }

    #[test]
    fn uuid_filters_keep_the_uuid_type() {
        let id = Uuid::new_v4();
        let filter = FilterField::eq_uuid("tenant_id", id);
        assert_eq!(filter.value, FilterValue::Uuid(id));
    }
}
