// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use bizreg::{CoreError, ErrorStatus};
use bizreg_domain::DomainError;
use bizreg_history::HistoryError;
use thiserror::Error;

/// Failures raised by the storage layer.
///
/// Driver errors are flattened to strings so the type stays `Clone` and
/// comparable in tests. Registry rule failures keep their [`CoreError`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PersistenceError {
    #[error("Database error: {0}")]
    DatabaseError(String),
    #[error("Database connection failed: {0}")]
    DatabaseConnectionFailed(String),
    #[error("Migration failed: {0}")]
    MigrationFailed(String),
    /// A PRAGMA or raw statement failed.
    #[error("Query failed: {0}")]
    QueryFailed(String),
    /// A stored JSON column or version row could not be read back.
    #[error("Serialization error: {0}")]
    SerializationError(String),
    #[error("Initialization error: {0}")]
    InitializationError(String),
    #[error("Foreign key enforcement is not enabled")]
    ForeignKeyEnforcementNotEnabled,
    #[error("Not found: {0}")]
    NotFound(String),
    /// The write broke a registry rule.
    #[error("{0}")]
    Rejected(CoreError),
}

impl PersistenceError {
    /// Status a caller should report for this failure.
    #[must_use]
    pub const fn status(&self) -> ErrorStatus {
        match self {
            Self::Rejected(err) => err.status(),
            Self::NotFound(_) => ErrorStatus::NotFound,
            _ => ErrorStatus::InternalServerError,
        }
    }

    /// Registry records are never hard-deleted.
    #[must_use]
    pub fn deletion_not_allowed() -> Self {
        Self::Rejected(CoreError::Forbidden("Deletion not allowed.".to_string()))
    }
}

impl From<diesel::result::Error> for PersistenceError {
    fn from(err: diesel::result::Error) -> Self {
        if matches!(err, diesel::result::Error::NotFound) {
            Self::NotFound("Record not found".to_string())
        } else {
            Self::DatabaseError(err.to_string())
        }
    }
}

impl From<diesel::ConnectionError> for PersistenceError {
    fn from(err: diesel::ConnectionError) -> Self {
        Self::DatabaseConnectionFailed(err.to_string())
    }
}

impl From<serde_json::Error> for PersistenceError {
    fn from(err: serde_json::Error) -> Self {
        Self::SerializationError(err.to_string())
    }
}

impl From<HistoryError> for PersistenceError {
    fn from(err: HistoryError) -> Self {
        Self::SerializationError(err.to_string())
    }
}

impl From<CoreError> for PersistenceError {
    fn from(err: CoreError) -> Self {
        Self::Rejected(err)
    }
}

impl From<DomainError> for PersistenceError {
    fn from(err: DomainError) -> Self {
        Self::Rejected(CoreError::DomainViolation(err))
    }
}
