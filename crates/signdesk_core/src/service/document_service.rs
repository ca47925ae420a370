//! Document use-case service.
//!
//! # Responsibility
//! - Provide tenant-scoped create/get/list/update/delete entry points that
//!   accept raw identifiers and JSON input.
//! - Delegate persistence to repository implementations.
//!
//! # Invariants
//! - Tenant and id are parsed before any storage access.
//! - `create` always stores `status = draft` and a fresh identity,
//!   whatever the caller supplied.
//! - Logs carry ids, tenant and counts only, never document content.

use crate::model::document::{DocumentDraft, DocumentPatch, DocumentRecord, UploadRequest};
use crate::model::ids::{parse_record_id, TenantId};
use crate::repo::document_repo::DocumentRepository;
use crate::repo::{RepoError, RepoResult, MAX_LIST_LIMIT};
use chrono::Utc;
use log::{info, warn};
use serde_json::Value;

/// Use-case service wrapper for document operations.
pub struct DocumentService<R: DocumentRepository> {
    repo: R,
}

impl<R: DocumentRepository> DocumentService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Creates a document from JSON input under `tenant`.
    ///
    /// # Contract
    /// - Missing `name` becomes "Untitled Document".
    /// - Caller-supplied `status`, `_id` and `business_id` are ignored.
    /// - Element validation failures surface as `RepoError::Validation`.
    pub fn create(&self, raw: &Value, tenant: &str) -> RepoResult<DocumentRecord> {
        let tenant = TenantId::parse(tenant)?;
        let draft = DocumentDraft::from_json(raw)?;
        self.insert(draft, tenant)
    }

    /// Creates an `upload-existing` document pointing at an uploaded file.
    pub fn create_from_upload(&self, raw: &Value, tenant: &str) -> RepoResult<DocumentRecord> {
        let tenant = TenantId::parse(tenant)?;
        let request = UploadRequest::from_json(raw)?;
        self.insert(request.into_draft(), tenant)
    }

    /// Inserts a typed draft. Used by callers that already hold typed input.
    pub fn create_draft(&self, draft: DocumentDraft, tenant: &str) -> RepoResult<DocumentRecord> {
        let tenant = TenantId::parse(tenant)?;
        self.insert(draft, tenant)
    }

    pub fn get(&self, id: &str, tenant: &str) -> RepoResult<DocumentRecord> {
        let tenant = TenantId::parse(tenant)?;
        let id = parse_record_id(id)?;
        self.repo
            .get_document(id, &tenant)?
            .ok_or(RepoError::NotFound(id))
    }

    /// Lists the tenant's documents in creation order, capped at
    /// `MAX_LIST_LIMIT`.
    pub fn list(&self, tenant: &str) -> RepoResult<Vec<DocumentRecord>> {
        let tenant = TenantId::parse(tenant)?;
        self.repo.list_documents(&tenant, MAX_LIST_LIMIT)
    }

    /// Applies a partial update and returns the stored record.
    ///
    /// Applying the same patch twice leaves the record as after the first
    /// application, apart from `updatedAt`.
    pub fn update(&self, id: &str, tenant: &str, raw: &Value) -> RepoResult<DocumentRecord> {
        let tenant = TenantId::parse(tenant)?;
        let id = parse_record_id(id)?;
        let patch = DocumentPatch::from_json(raw)?;

        match self.repo.update_document(id, &tenant, &patch) {
            Ok(record) => {
                info!(
                    "event=document_update module=service status=ok id={id} business_id={tenant}"
                );
                Ok(record)
            }
            Err(err) => {
                warn!(
                    "event=document_update module=service status=error id={id} business_id={tenant} error_code={}",
                    err.code()
                );
                Err(err)
            }
        }
    }

    pub fn delete(&self, id: &str, tenant: &str) -> RepoResult<()> {
        let tenant = TenantId::parse(tenant)?;
        let id = parse_record_id(id)?;
        self.repo.delete_document(id, &tenant)?;
        info!("event=document_delete module=service status=ok id={id} business_id={tenant}");
        Ok(())
    }

    fn insert(&self, draft: DocumentDraft, tenant: TenantId) -> RepoResult<DocumentRecord> {
        let record = draft.into_record(tenant, Utc::now());
        self.repo.insert_document(&record)?;
        info!(
            "event=document_create module=service status=ok id={} business_id={} elements={}",
            record.id,
            record.tenant,
            record.canvas_elements.len()
        );
        Ok(record)
    }
}
