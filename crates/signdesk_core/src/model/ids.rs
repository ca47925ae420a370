//! Record identity and tenant scoping primitives.
//!
//! # Responsibility
//! - Parse caller-supplied identifiers before any storage access.
//! - Reject missing tenants before any storage access.
//!
//! # Invariants
//! - `RecordId` is server-assigned at creation and never reused.
//! - `TenantId` is never blank; surrounding whitespace is trimmed.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier of every persisted document, contract and settings row.
pub type RecordId = Uuid;

/// Errors raised while parsing identity or tenant input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdentityError {
    /// Identifier text is not a well-formed record id.
    InvalidIdentifier(String),
    /// Tenant is missing or blank.
    TenantRequired,
}

impl Display for IdentityError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidIdentifier(value) => write!(f, "invalid identifier: `{value}`"),
            Self::TenantRequired => write!(f, "business_id is required"),
        }
    }
}

impl Error for IdentityError {}

/// Parses a record identifier from caller input.
///
/// # Errors
/// - Returns `InvalidIdentifier` when `value` is not a UUID.
pub fn parse_record_id(value: &str) -> Result<RecordId, IdentityError> {
    Uuid::parse_str(value.trim()).map_err(|_| IdentityError::InvalidIdentifier(value.to_string()))
}

/// Tenant scope (`business_id`) for documents, contracts and settings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TenantId(String);

impl TenantId {
    /// Parses a tenant from caller input.
    ///
    /// # Errors
    /// - Returns `TenantRequired` when `value` is empty after trim.
    pub fn parse(value: &str) -> Result<Self, IdentityError> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(IdentityError::TenantRequired);
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl TryFrom<String> for TenantId {
    type Error = IdentityError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value.as_str())
    }
}

impl From<TenantId> for String {
    fn from(value: TenantId) -> Self {
        value.0
    }
}

impl Display for TenantId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.0.as_str())
    }
}
