//! # rentdesk-database
//!
//! PostgreSQL connection management, sqlx error classification, the company
//! isolation guard, and repository implementations for RentDesk.

pub mod connection;
pub mod repositories;
pub mod scope;

pub use connection::DatabasePool;
pub use scope::{CompanyScope, ScopedRepository};

use rentdesk_core::error::{AppError, ErrorKind};

/// Map a sqlx error into the application taxonomy.
///
/// Pool exhaustion and transport failures become `Unavailable` (retryable);
/// everything else is a persistent `Database` fault. The distinction matters:
/// a store outage must never be reported as a missing row or an invalid
/// session.
pub fn classify_sqlx_error(context: &str, e: sqlx::Error) -> AppError {
    let kind = match &e {
        sqlx::Error::PoolTimedOut
        | sqlx::Error::PoolClosed
        | sqlx::Error::WorkerCrashed
        | sqlx::Error::Io(_) => ErrorKind::Unavailable,
        _ => ErrorKind::Database,
    };
    AppError::with_source(kind, context.to_string(), e)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pool_timeout_is_transient() {
        let err = classify_sqlx_error("fetch session", sqlx::Error::PoolTimedOut);
        assert!(err.is_transient());
    }

    #[test]
    fn row_decode_failure_is_persistent() {
        let err = classify_sqlx_error(
            "fetch session",
            sqlx::Error::ColumnNotFound("token".to_string()),
        );
        assert!(!err.is_transient());
        assert_eq!(err.kind, ErrorKind::Database);
    }
}
