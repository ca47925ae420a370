//! Document repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide tenant-scoped CRUD over the `documents` collection.
//! - Provide the unscoped id-set lookup and id projection used by the
//!   contract-management aggregate.
//!
//! # Invariants
//! - Write paths call `DocumentRecord::validate()` before SQL mutations.
//! - A record owned by another tenant is indistinguishable from a missing one.

use crate::model::document::{DocumentPatch, DocumentRecord};
use crate::model::ids::{RecordId, TenantId};
use crate::repo::collection::{
    delete_record, ensure_schema, find_records_by_ids, get_record, insert_record,
    list_record_ids, list_records, update_record, StoredRecord,
};
use crate::repo::error::RepoResult;
use chrono::Utc;
use rusqlite::Connection;

impl StoredRecord for DocumentRecord {
    const COLLECTION: &'static str = "documents";

    fn record_id(&self) -> RecordId {
        self.id
    }

    fn tenant(&self) -> &TenantId {
        &self.tenant
    }
}

/// Repository interface for document persistence.
pub trait DocumentRepository {
    fn insert_document(&self, record: &DocumentRecord) -> RepoResult<()>;
    fn get_document(&self, id: RecordId, tenant: &TenantId) -> RepoResult<Option<DocumentRecord>>;
    fn list_documents(&self, tenant: &TenantId, limit: u32) -> RepoResult<Vec<DocumentRecord>>;
    /// Applies `patch` atomically and returns the stored result.
    fn update_document(
        &self,
        id: RecordId,
        tenant: &TenantId,
        patch: &DocumentPatch,
    ) -> RepoResult<DocumentRecord>;
    fn delete_document(&self, id: RecordId, tenant: &TenantId) -> RepoResult<()>;
    /// Unscoped lookup by id set; unknown ids are skipped.
    fn find_documents_by_ids(&self, ids: &[RecordId]) -> RepoResult<Vec<DocumentRecord>>;
    /// Every stored document id, all tenants.
    fn list_document_ids(&self) -> RepoResult<Vec<RecordId>>;
}

/// SQLite-backed document repository.
pub struct SqliteDocumentRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteDocumentRepository<'conn> {
    /// Constructs a repository from a migrated connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_schema(conn)?;
        Ok(Self { conn })
    }
}

impl DocumentRepository for SqliteDocumentRepository<'_> {
    fn insert_document(&self, record: &DocumentRecord) -> RepoResult<()> {
        record.validate()?;
        insert_record(self.conn, record)
    }

    fn get_document(&self, id: RecordId, tenant: &TenantId) -> RepoResult<Option<DocumentRecord>> {
        get_record(self.conn, id, tenant)
    }

    fn list_documents(&self, tenant: &TenantId, limit: u32) -> RepoResult<Vec<DocumentRecord>> {
        list_records(self.conn, tenant, limit)
    }

    fn update_document(
        &self,
        id: RecordId,
        tenant: &TenantId,
        patch: &DocumentPatch,
    ) -> RepoResult<DocumentRecord> {
        update_record(self.conn, id, tenant, |record: &mut DocumentRecord| {
            patch.apply_to(record);
            record.updated_at = Utc::now();
            record.validate()?;
            Ok(())
        })
    }

    fn delete_document(&self, id: RecordId, tenant: &TenantId) -> RepoResult<()> {
        delete_record::<DocumentRecord>(self.conn, id, tenant)
    }

    fn find_documents_by_ids(&self, ids: &[RecordId]) -> RepoResult<Vec<DocumentRecord>> {
        find_records_by_ids(self.conn, ids)
    }

    fn list_document_ids(&self) -> RepoResult<Vec<RecordId>> {
        list_record_ids::<DocumentRecord>(self.conn)
    }
}
