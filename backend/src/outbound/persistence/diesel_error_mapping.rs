//! Classification of Diesel and pool failures shared by the repositories.
//!
//! Each repository turns a [`StoreFailure`] into its own port error, so the
//! Diesel error taxonomy never crosses into the domain.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

use super::pool::PoolError;

/// Storage failure reduced to what the ports distinguish.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum StoreFailure {
    /// The pool or server connection is unavailable.
    Connection(String),
    /// A unique constraint rejected the write.
    UniqueViolation { constraint: Option<String> },
    /// A foreign key rejected the write.
    ForeignKeyViolation { constraint: Option<String> },
    /// Any other query failure.
    Query(String),
}

impl StoreFailure {
    /// Whether this is a unique violation of `constraint`.
    pub(crate) fn violates(&self, constraint: &str) -> bool {
        matches!(
            self,
            Self::UniqueViolation { constraint: Some(name) } if name == constraint
        )
    }
}

impl From<PoolError> for StoreFailure {
    fn from(error: PoolError) -> Self {
        Self::Connection(error.message().to_owned())
    }
}

/// Classify a Diesel error, logging the driver detail at debug level.
pub(crate) fn classify(error: DieselError, operation: &'static str) -> StoreFailure {
    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, operation, message = info.message(), "diesel operation failed");
        }
        other => debug!(operation, error = %other, "diesel operation failed"),
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            StoreFailure::Connection("database connection closed".to_owned())
        }
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
            StoreFailure::UniqueViolation {
                constraint: info.constraint_name().map(str::to_owned),
            }
        }
        DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, info) => {
            StoreFailure::ForeignKeyViolation {
                constraint: info.constraint_name().map(str::to_owned),
            }
        }
        DieselError::NotFound => StoreFailure::Query(format!("{operation}: record not found")),
        DieselError::QueryBuilderError(_) => {
            StoreFailure::Query(format!("{operation}: invalid query"))
        }
        _ => StoreFailure::Query(format!("{operation}: database error")),
    }
}

/// Row-count conversion for `DELETE` results.
pub(crate) fn affected(rows: usize) -> bool {
    rows > 0
}
