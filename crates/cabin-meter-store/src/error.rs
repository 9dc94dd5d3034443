//! Error types for cabin meter storage.

use cabin_meter_core::MeterError;

/// Result type for storage operations.
pub type Result<T> = std::result::Result<T, StoreError>;

/// Errors that can occur in storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Database operation failed.
    #[error("database error: {0}")]
    Database(String),

    /// A stored row could not be decoded into a domain record.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// Record not found.
    #[error("{entity} not found: {id}")]
    NotFound {
        /// Kind of record ("cabin", "usage").
        entity: &'static str,
        /// Key that was looked up.
        id: String,
    },

    /// Unique key already taken.
    #[error("{entity} already exists: {id}")]
    Conflict {
        /// Kind of record.
        entity: &'static str,
        /// Duplicate key.
        id: String,
    },

    /// A domain rule rejected the operation.
    #[error(transparent)]
    Domain(#[from] MeterError),
}

impl StoreError {
    pub(crate) fn cabin_not_found(number: impl ToString) -> Self {
        Self::NotFound {
            entity: "cabin",
            id: number.to_string(),
        }
    }

    pub(crate) fn usage_not_found(id: impl ToString) -> Self {
        Self::NotFound {
            entity: "usage",
            id: id.to_string(),
        }
    }
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<sqlx::migrate::MigrateError> for StoreError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        Self::Database(format!("migration failed: {err}"))
    }
}
