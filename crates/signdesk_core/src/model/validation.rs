//! Record-level validation errors.

use super::element::SchemaError;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Caller-recoverable validation failure for record input or state.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// A canvas element or page failed schema validation.
    Schema(SchemaError),
    /// A record field is missing or has the wrong shape.
    InvalidField { field: String, message: String },
    /// Element references a page index outside `0..totalPages`.
    PageOutOfRange {
        element_id: String,
        page: u32,
        total_pages: u32,
    },
    /// Two elements in the same element list share an id.
    DuplicateElementId(String),
    /// A required name is empty or whitespace.
    EmptyName,
}

impl ValidationError {
    pub(crate) fn invalid_field(field: impl Into<String>, message: impl Display) -> Self {
        Self::InvalidField {
            field: field.into(),
            message: message.to_string(),
        }
    }
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Schema(err) => write!(f, "{err}"),
            Self::InvalidField { field, message } => write!(f, "invalid `{field}`: {message}"),
            Self::PageOutOfRange {
                element_id,
                page,
                total_pages,
            } => write!(
                f,
                "element `{element_id}` is on page {page} but document has {total_pages} pages"
            ),
            Self::DuplicateElementId(id) => write!(f, "duplicate element id `{id}`"),
            Self::EmptyName => write!(f, "name cannot be empty"),
        }
    }
}

impl Error for ValidationError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Schema(err) => Some(err),
            _ => None,
        }
    }
}

impl From<SchemaError> for ValidationError {
    fn from(value: SchemaError) -> Self {
        Self::Schema(value)
    }
}
