//! Unified application error types for RentDesk.
//!
//! All crates map their internal errors into [`AppError`] for consistent
//! propagation through the `?` operator.
//!
//! Two distinctions in this taxonomy are deliberate and load-bearing:
//!
//! - `Unauthenticated` and `NotFound` carry generic, non-revealing messages.
//!   Whether a token is unknown, expired, or revoked, and whether a row is
//!   absent or belongs to another company, must not be distinguishable by
//!   the caller. Internal detail for audit logs goes into [`AppError::detail`].
//! - `Unavailable` marks a transient store failure (pool timeout, connection
//!   loss). It is retryable and must never be collapsed into `Unauthenticated`
//!   or `NotFound`, otherwise a database outage looks like a mass logout.

use std::fmt;
use thiserror::Error;

/// Top-level error kind categorization used across the entire application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum ErrorKind {
    /// No valid session: missing, expired, or revoked token.
    Unauthenticated,
    /// The requested resource was not found (or is owned by another company).
    NotFound,
    /// A referenced resource belongs to another company.
    Forbidden,
    /// Input validation failed.
    Validation,
    /// A conflict occurred (duplicate entry, concurrent modification).
    Conflict,
    /// A persistent database error occurred.
    Database,
    /// The backing store is temporarily unreachable; the caller may retry.
    Unavailable,
    /// A configuration error occurred.
    Configuration,
    /// An internal server error occurred.
    Internal,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unauthenticated => write!(f, "UNAUTHENTICATED"),
            Self::NotFound => write!(f, "NOT_FOUND"),
            Self::Forbidden => write!(f, "FORBIDDEN"),
            Self::Validation => write!(f, "VALIDATION"),
            Self::Conflict => write!(f, "CONFLICT"),
            Self::Database => write!(f, "DATABASE"),
            Self::Unavailable => write!(f, "UNAVAILABLE"),
            Self::Configuration => write!(f, "CONFIGURATION"),
            Self::Internal => write!(f, "INTERNAL"),
        }
    }
}

/// The unified application error used throughout RentDesk.
///
/// `message` is safe to surface to a caller. `detail` is audit-only context
/// (which id, which company mismatch) and must only ever reach logs.
#[derive(Debug, Error)]
#[error("{kind}: {message}")]
pub struct AppError {
    /// The category of error.
    pub kind: ErrorKind,
    /// A caller-safe, human-readable error message.
    pub message: String,
    /// Audit-only context, never included in caller-facing output.
    pub detail: Option<String>,
    /// Optional underlying cause.
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl AppError {
    /// Create a new application error.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            detail: None,
            source: None,
        }
    }

    /// Create a new application error with an underlying cause.
    pub fn with_source(
        kind: ErrorKind,
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            kind,
            message: message.into(),
            detail: None,
            source: Some(Box::new(source)),
        }
    }

    /// Attach audit-only detail to this error.
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    /// Create an unauthenticated error with the fixed, non-revealing message.
    pub fn unauthenticated() -> Self {
        Self::new(ErrorKind::Unauthenticated, "authentication required")
    }

    /// Create a not-found error with the fixed, non-revealing message.
    pub fn not_found() -> Self {
        Self::new(ErrorKind::NotFound, "resource not found")
    }

    /// Create a forbidden error.
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Forbidden, message)
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Validation, message)
    }

    /// Create a conflict error.
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Conflict, message)
    }

    /// Create a database error.
    pub fn database(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Database, message)
    }

    /// Create a transient store-unavailable error.
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Unavailable, message)
    }

    /// Create a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Configuration, message)
    }

    /// Create an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal, message)
    }

    /// Whether the operation may be retried at the transport layer.
    pub fn is_transient(&self) -> bool {
        self.kind == ErrorKind::Unavailable
    }
}

impl Clone for AppError {
    fn clone(&self) -> Self {
        Self {
            kind: self.kind,
            message: self.message.clone(),
            detail: self.detail.clone(),
            source: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unauthenticated_message_is_generic() {
        let unknown = AppError::unauthenticated().with_detail("token not in store");
        let expired = AppError::unauthenticated().with_detail("expired 2h ago");
        assert_eq!(unknown.message, expired.message);
        assert_ne!(unknown.detail, expired.detail);
    }

    #[test]
    fn display_omits_audit_detail() {
        let err = AppError::not_found().with_detail("ticket 42 belongs to company B");
        let rendered = err.to_string();
        assert!(!rendered.contains("company B"));
        assert!(rendered.contains("NOT_FOUND"));
    }

    #[test]
    fn only_unavailable_is_transient() {
        assert!(AppError::unavailable("pool timeout").is_transient());
        assert!(!AppError::unauthenticated().is_transient());
        assert!(!AppError::database("constraint violation").is_transient());
    }
}
