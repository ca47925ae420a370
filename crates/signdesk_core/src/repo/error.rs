//! Repository error taxonomy shared by every collection.
//!
//! # Invariants
//! - Cross-tenant access and missing records both surface as `NotFound`.
//! - `InvalidIdentifier` and `TenantRequired` are produced before any
//!   storage access.
//! - Storage failures are surfaced as-is and never retried here.

use crate::db::DbError;
use crate::model::element::SchemaError;
use crate::model::ids::{IdentityError, RecordId};
use crate::model::validation::ValidationError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RepoResult<T> = Result<T, RepoError>;

#[derive(Debug)]
pub enum RepoError {
    /// Caller input failed validation.
    Validation(ValidationError),
    /// Identifier text is malformed.
    InvalidIdentifier(String),
    /// No record for the id within the tenant scope.
    NotFound(RecordId),
    /// Tenant missing or blank.
    TenantRequired,
    /// Underlying storage failed.
    StorageUnavailable(DbError),
    /// Connection schema is not at the version this binary expects.
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    /// Persisted body cannot be decoded into a valid record.
    InvalidData(String),
}

impl RepoError {
    /// Stable machine-readable code for transport-level mapping.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::InvalidIdentifier(_) => "INVALID_IDENTIFIER",
            Self::NotFound(_) => "NOT_FOUND",
            Self::TenantRequired => "TENANT_REQUIRED",
            Self::StorageUnavailable(_) | Self::UninitializedConnection { .. } => {
                "STORAGE_UNAVAILABLE"
            }
            Self::InvalidData(_) => "INVALID_DATA",
        }
    }

    /// Whether the caller can fix the request and try again.
    pub fn is_caller_error(&self) -> bool {
        matches!(
            self,
            Self::Validation(_)
                | Self::InvalidIdentifier(_)
                | Self::NotFound(_)
                | Self::TenantRequired
        )
    }
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::InvalidIdentifier(value) => write!(f, "invalid identifier: `{value}`"),
            Self::NotFound(id) => write!(f, "record not found: {id}"),
            Self::TenantRequired => write!(f, "business_id is required"),
            Self::StorageUnavailable(err) => write!(f, "storage unavailable: {err}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "repository requires schema version {expected_version}, got {actual_version}"
            ),
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::StorageUnavailable(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ValidationError> for RepoError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<SchemaError> for RepoError {
    fn from(value: SchemaError) -> Self {
        Self::Validation(ValidationError::Schema(value))
    }
}

impl From<IdentityError> for RepoError {
    fn from(value: IdentityError) -> Self {
        match value {
            IdentityError::InvalidIdentifier(text) => Self::InvalidIdentifier(text),
            IdentityError::TenantRequired => Self::TenantRequired,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::StorageUnavailable(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::StorageUnavailable(DbError::Sqlite(value))
    }
}
