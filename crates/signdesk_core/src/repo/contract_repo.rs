//! Contract repository contracts and SQLite implementation.
//!
//! # Invariants
//! - Same tenant scoping rules as the document repository.
//! - `value` stays a finite number across inserts and updates.

use crate::model::contract::{ContractPatch, ContractRecord};
use crate::model::ids::{RecordId, TenantId};
use crate::repo::collection::{
    delete_record, ensure_schema, find_records_by_ids, get_record, insert_record,
    list_record_ids, list_records, update_record, StoredRecord,
};
use crate::repo::error::RepoResult;
use chrono::Utc;
use rusqlite::Connection;

impl StoredRecord for ContractRecord {
    const COLLECTION: &'static str = "contracts";

    fn record_id(&self) -> RecordId {
        self.id
    }

    fn tenant(&self) -> &TenantId {
        &self.tenant
    }
}

/// Repository interface for contract persistence.
pub trait ContractRepository {
    fn insert_contract(&self, record: &ContractRecord) -> RepoResult<()>;
    fn get_contract(&self, id: RecordId, tenant: &TenantId) -> RepoResult<Option<ContractRecord>>;
    fn list_contracts(&self, tenant: &TenantId, limit: u32) -> RepoResult<Vec<ContractRecord>>;
    fn update_contract(
        &self,
        id: RecordId,
        tenant: &TenantId,
        patch: &ContractPatch,
    ) -> RepoResult<ContractRecord>;
    fn delete_contract(&self, id: RecordId, tenant: &TenantId) -> RepoResult<()>;
    fn find_contracts_by_ids(&self, ids: &[RecordId]) -> RepoResult<Vec<ContractRecord>>;
    fn list_contract_ids(&self) -> RepoResult<Vec<RecordId>>;
}

/// SQLite-backed contract repository.
pub struct SqliteContractRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteContractRepository<'conn> {
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_schema(conn)?;
        Ok(Self { conn })
    }
}

impl ContractRepository for SqliteContractRepository<'_> {
    fn insert_contract(&self, record: &ContractRecord) -> RepoResult<()> {
        record.validate()?;
        insert_record(self.conn, record)
    }

    fn get_contract(&self, id: RecordId, tenant: &TenantId) -> RepoResult<Option<ContractRecord>> {
        get_record(self.conn, id, tenant)
    }

    fn list_contracts(&self, tenant: &TenantId, limit: u32) -> RepoResult<Vec<ContractRecord>> {
        list_records(self.conn, tenant, limit)
    }

    fn update_contract(
        &self,
        id: RecordId,
        tenant: &TenantId,
        patch: &ContractPatch,
    ) -> RepoResult<ContractRecord> {
        update_record(self.conn, id, tenant, |record: &mut ContractRecord| {
            patch.apply_to(record);
            record.updated_at = Utc::now();
            record.validate()?;
            Ok(())
        })
    }

    fn delete_contract(&self, id: RecordId, tenant: &TenantId) -> RepoResult<()> {
        delete_record::<ContractRecord>(self.conn, id, tenant)
    }

    fn find_contracts_by_ids(&self, ids: &[RecordId]) -> RepoResult<Vec<ContractRecord>> {
        find_records_by_ids(self.conn, ids)
    }

    fn list_contract_ids(&self) -> RepoResult<Vec<RecordId>> {
        list_record_ids::<ContractRecord>(self.conn)
    }
}
