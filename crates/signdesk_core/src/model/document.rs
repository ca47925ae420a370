//! Document record model.
//!
//! # Responsibility
//! - Define the persisted document shape embedding pages and canvas elements.
//! - Define create inputs (`DocumentDraft`, `UploadRequest`) and the partial
//!   update input (`DocumentPatch`).
//!
//! # Invariants
//! - Newly created documents always start in `DocumentStatus::Draft`.
//! - Every element's `page` is below `totalPages`.
//! - Element ids are unique within `canvasElements` and within the union of
//!   page layouts. The two lists are kept in sync by the caller.
//! - Status has no transition graph; any status may follow any other.

use super::element::{validate_elements, validate_page, CanvasElement, Page};
use super::ids::{RecordId, TenantId};
use super::validation::ValidationError;
use super::{explicit_null, null_as_default};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::{BTreeMap, HashSet};
use uuid::Uuid;

pub const DEFAULT_DOCUMENT_NAME: &str = "Untitled Document";

/// Document lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentStatus {
    #[default]
    Draft,
    Waiting,
    Completed,
    Archived,
}

impl DocumentStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Waiting => "waiting",
            Self::Completed => "completed",
            Self::Archived => "archived",
        }
    }
}

/// How the document was started.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DocumentType {
    #[serde(rename = "upload-existing")]
    UploadExisting,
    #[default]
    #[serde(rename = "new_document")]
    NewDocument,
}

/// Participant role on a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SignerRole {
    Signer,
    Approver,
    Cc,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signer {
    pub name: String,
    pub email: String,
    #[serde(rename = "type")]
    pub role: SignerRole,
    /// Meaningful only when the document has `signingOrder` enabled.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentVariable {
    pub name: String,
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_system: Option<bool>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageDimension {
    pub width: f64,
    pub height: f64,
}

pub type PageDimensions = BTreeMap<String, PageDimension>;

/// Persisted document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentRecord {
    #[serde(rename = "_id", alias = "id")]
    pub id: RecordId,
    pub name: String,
    #[serde(default)]
    pub status: DocumentStatus,
    /// Creation time.
    pub date: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub signers: Vec<Signer>,
    /// Advisory percentage; not bounded.
    #[serde(default)]
    pub progress: i64,
    #[serde(default)]
    pub due_date: Option<String>,
    #[serde(default)]
    pub created_by: Option<String>,
    #[serde(default)]
    pub signing_order: bool,
    #[serde(default)]
    pub variables: Vec<DocumentVariable>,
    #[serde(rename = "business_id")]
    pub tenant: TenantId,
    #[serde(default)]
    pub pages: Vec<Page>,
    #[serde(default)]
    pub upload_path: Option<String>,
    #[serde(default)]
    pub total_pages: u32,
    /// Flat legacy element list kept alongside per-page layouts.
    #[serde(default)]
    pub canvas_elements: Vec<CanvasElement>,
    #[serde(default)]
    pub page_dimensions: Option<PageDimensions>,
    #[serde(default)]
    pub document_type: DocumentType,
}

impl DocumentRecord {
    /// Validates element placement and element identity.
    pub fn validate(&self) -> Result<(), ValidationError> {
        check_element_list(self.canvas_elements.iter(), self.total_pages)?;
        check_element_list(
            self.pages.iter().flat_map(|page| page.layout.iter()),
            self.total_pages,
        )
    }
}

fn check_element_list<'a>(
    elements: impl Iterator<Item = &'a CanvasElement>,
    total_pages: u32,
) -> Result<(), ValidationError> {
    let mut seen = HashSet::new();
    for element in elements {
        element.validate()?;
        if element.page() >= total_pages {
            return Err(ValidationError::PageOutOfRange {
                element_id: element.id().to_string(),
                page: element.page(),
                total_pages,
            });
        }
        if !seen.insert(element.id()) {
            return Err(ValidationError::DuplicateElementId(element.id().to_string()));
        }
    }
    Ok(())
}

/// Runs element validation on raw input so schema failures keep their type.
fn check_raw_elements(raw: &Value) -> Result<(), ValidationError> {
    validate_elements(raw.get("canvasElements"))?;
    match raw.get("pages") {
        None | Some(Value::Null) => Ok(()),
        Some(Value::Array(pages)) => {
            for page in pages {
                validate_page(page)?;
            }
            Ok(())
        }
        Some(_) => Err(ValidationError::invalid_field("pages", "expected an array")),
    }
}

fn default_document_name() -> String {
    DEFAULT_DOCUMENT_NAME.to_string()
}

/// Create input for a new document.
///
/// `status` and `business_id` in the input are ignored: the tenant comes
/// from the caller scope and the status is always `draft`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentDraft {
    #[serde(default = "default_document_name")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub signers: Vec<Signer>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub signing_order: bool,
    #[serde(default)]
    pub due_date: Option<String>,
    #[serde(default)]
    pub created_by: Option<String>,
    #[serde(default)]
    pub upload_path: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub document_type: DocumentType,
    #[serde(default, deserialize_with = "null_as_default")]
    pub pages: Vec<Page>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub canvas_elements: Vec<CanvasElement>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub variables: Vec<DocumentVariable>,
    #[serde(default)]
    pub page_dimensions: Option<PageDimensions>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub total_pages: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub progress: i64,
}

impl Default for DocumentDraft {
    fn default() -> Self {
        Self {
            name: default_document_name(),
            signers: Vec::new(),
            signing_order: false,
            due_date: None,
            created_by: None,
            upload_path: None,
            document_type: DocumentType::default(),
            pages: Vec::new(),
            canvas_elements: Vec::new(),
            variables: Vec::new(),
            page_dimensions: None,
            total_pages: 0,
            progress: 0,
        }
    }
}

impl DocumentDraft {
    /// Parses create input from a JSON object.
    pub fn from_json(raw: &Value) -> Result<Self, ValidationError> {
        if !raw.is_object() {
            return Err(ValidationError::invalid_field("document", "expected an object"));
        }
        check_raw_elements(raw)?;
        Self::deserialize(raw).map_err(|err| ValidationError::invalid_field("document", err))
    }

    /// Builds the record to persist, assigning a fresh identity.
    pub fn into_record(self, tenant: TenantId, now: DateTime<Utc>) -> DocumentRecord {
        DocumentRecord {
            id: Uuid::new_v4(),
            name: self.name,
            status: DocumentStatus::Draft,
            date: now,
            updated_at: now,
            signers: self.signers,
            progress: self.progress,
            due_date: self.due_date,
            created_by: self.created_by,
            signing_order: self.signing_order,
            variables: self.variables,
            tenant,
            pages: self.pages,
            upload_path: self.upload_path,
            total_pages: self.total_pages,
            canvas_elements: self.canvas_elements,
            page_dimensions: self.page_dimensions,
            document_type: self.document_type,
        }
    }
}

/// Create input for a document backed by an already uploaded PDF.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadRequest {
    #[serde(default = "default_document_name")]
    pub document_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub signers: Vec<Signer>,
    pub upload_path: String,
}

impl UploadRequest {
    pub fn from_json(raw: &Value) -> Result<Self, ValidationError> {
        Self::deserialize(raw).map_err(|err| ValidationError::invalid_field("upload", err))
    }

    pub fn into_draft(self) -> DocumentDraft {
        DocumentDraft {
            name: self.document_name,
            signers: self.signers,
            upload_path: Some(self.upload_path),
            document_type: DocumentType::UploadExisting,
            ..DocumentDraft::default()
        }
    }
}

/// Partial update for a document.
///
/// Absent keys leave the stored value untouched. `dueDate`, `uploadPath` and
/// `pageDimensions` accept an explicit `null` to clear the stored value;
/// `null` on any other key is treated as absent.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentPatch {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub status: Option<DocumentStatus>,
    #[serde(default)]
    pub signers: Option<Vec<Signer>>,
    #[serde(default)]
    pub signing_order: Option<bool>,
    #[serde(default, deserialize_with = "explicit_null")]
    pub due_date: Option<Option<String>>,
    #[serde(default, deserialize_with = "explicit_null")]
    pub upload_path: Option<Option<String>>,
    #[serde(default)]
    pub canvas_elements: Option<Vec<CanvasElement>>,
    #[serde(default, deserialize_with = "explicit_null")]
    pub page_dimensions: Option<Option<PageDimensions>>,
    #[serde(default)]
    pub total_pages: Option<u32>,
    #[serde(default)]
    pub variables: Option<Vec<DocumentVariable>>,
    #[serde(default)]
    pub pages: Option<Vec<Page>>,
    #[serde(default)]
    pub progress: Option<i64>,
}

impl DocumentPatch {
    /// Parses a partial update from a JSON object.
    pub fn from_json(raw: &Value) -> Result<Self, ValidationError> {
        if !raw.is_object() {
            return Err(ValidationError::invalid_field("document", "expected an object"));
        }
        check_raw_elements(raw)?;
        Self::deserialize(raw).map_err(|err| ValidationError::invalid_field("document", err))
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Overwrites the fields present in this patch. Idempotent.
    pub fn apply_to(&self, record: &mut DocumentRecord) {
        if let Some(name) = &self.name {
            record.name = name.clone();
        }
        if let Some(status) = self.status {
            record.status = status;
        }
        if let Some(signers) = &self.signers {
            record.signers = signers.clone();
        }
        if let Some(signing_order) = self.signing_order {
            record.signing_order = signing_order;
        }
        if let Some(due_date) = &self.due_date {
            record.due_date = due_date.clone();
        }
        if let Some(upload_path) = &self.upload_path {
            record.upload_path = upload_path.clone();
        }
        if let Some(elements) = &self.canvas_elements {
            record.canvas_elements = elements.clone();
        }
        if let Some(dimensions) = &self.page_dimensions {
            record.page_dimensions = dimensions.clone();
        }
        if let Some(total_pages) = self.total_pages {
            record.total_pages = total_pages;
        }
        if let Some(variables) = &self.variables {
            record.variables = variables.clone();
        }
        if let Some(pages) = &self.pages {
            record.pages = pages.clone();
        }
        if let Some(progress) = self.progress {
            record.progress = progress;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{DocumentDraft, DocumentPatch, DocumentStatus, DocumentType, UploadRequest};
    use crate::model::ids::TenantId;
    use crate::model::validation::ValidationError;
    use chrono::Utc;
    use serde_json::json;

    #[test]
    fn draft_ignores_caller_status_and_tenant() {
        let draft = DocumentDraft::from_json(&json!({
            "name": "NDA",
            "status": "completed",
            "business_id": "other"
        }))
        .unwrap();
        let record = draft.into_record(TenantId::parse("t1").unwrap(), Utc::now());
        assert_eq!(record.status, DocumentStatus::Draft);
        assert_eq!(record.tenant.as_str(), "t1");
        assert_eq!(record.total_pages, 0);
        assert_eq!(record.document_type, DocumentType::NewDocument);
    }

    #[test]
    fn patch_distinguishes_null_from_absent() {
        let patch = DocumentPatch::from_json(&json!({ "dueDate": null })).unwrap();
        assert_eq!(patch.due_date, Some(None));
        assert_eq!(patch.upload_path, None);

        let empty = DocumentPatch::from_json(&json!({})).unwrap();
        assert!(empty.is_empty());
    }

    #[test]
    fn patch_rejects_unknown_status() {
        let err = DocumentPatch::from_json(&json!({ "status": "signed" })).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidField { .. }));
    }

    #[test]
    fn record_rejects_element_beyond_total_pages() {
        let draft = DocumentDraft::from_json(&json!({
            "totalPages": 1,
            "canvasElements": [{
                "type": "checkbox", "id": "c1", "page": 1,
                "x": 0, "y": 0, "width": 10, "height": 10, "checked": false
            }]
        }))
        .unwrap();
        let record = draft.into_record(TenantId::parse("t1").unwrap(), Utc::now());
        let err = record.validate().unwrap_err();
        assert_eq!(
            err,
            ValidationError::PageOutOfRange {
                element_id: "c1".to_string(),
                page: 1,
                total_pages: 1
            }
        );
    }

    #[test]
    fn upload_request_marks_document_as_upload() {
        let request = UploadRequest::from_json(&json!({ "uploadPath": "uploads/a.pdf" })).unwrap();
        let draft = request.into_draft();
        assert_eq!(draft.name, "Untitled Document");
        assert_eq!(draft.document_type, DocumentType::UploadExisting);
        assert_eq!(draft.upload_path.as_deref(), Some("uploads/a.pdf"));
    }
}
