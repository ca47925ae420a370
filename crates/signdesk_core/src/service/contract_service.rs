//! Contract use-case service.
//!
//! Mirrors the document service: raw ids and tenants are parsed up front,
//! `create` forces `status = draft`.

use crate::model::contract::{ContractDraft, ContractPatch, ContractRecord};
use crate::model::ids::{parse_record_id, TenantId};
use crate::repo::contract_repo::ContractRepository;
use crate::repo::{RepoError, RepoResult, MAX_LIST_LIMIT};
use chrono::Utc;
use log::info;
use serde_json::Value;

pub struct ContractService<R: ContractRepository> {
    repo: R,
}

impl<R: ContractRepository> ContractService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Creates a contract from JSON input. `name` is required.
    pub fn create(&self, raw: &Value, tenant: &str) -> RepoResult<ContractRecord> {
        let tenant = TenantId::parse(tenant)?;
        let draft = ContractDraft::from_json(raw)?;
        self.insert(draft, tenant)
    }

    pub fn create_draft(&self, draft: ContractDraft, tenant: &str) -> RepoResult<ContractRecord> {
        let tenant = TenantId::parse(tenant)?;
        self.insert(draft, tenant)
    }

    pub fn get(&self, id: &str, tenant: &str) -> RepoResult<ContractRecord> {
        let tenant = TenantId::parse(tenant)?;
        let id = parse_record_id(id)?;
        self.repo
            .get_contract(id, &tenant)?
            .ok_or(RepoError::NotFound(id))
    }

    pub fn list(&self, tenant: &str) -> RepoResult<Vec<ContractRecord>> {
        let tenant = TenantId::parse(tenant)?;
        self.repo.list_contracts(&tenant, MAX_LIST_LIMIT)
    }

    pub fn update(&self, id: &str, tenant: &str, raw: &Value) -> RepoResult<ContractRecord> {
        let tenant = TenantId::parse(tenant)?;
        let id = parse_record_id(id)?;
        let patch = ContractPatch::from_json(raw)?;
        let record = self.repo.update_contract(id, &tenant, &patch)?;
        info!("event=contract_update module=service status=ok id={id} business_id={tenant}");
        Ok(record)
    }

    pub fn delete(&self, id: &str, tenant: &str) -> RepoResult<()> {
        let tenant = TenantId::parse(tenant)?;
        let id = parse_record_id(id)?;
        self.repo.delete_contract(id, &tenant)?;
        info!("event=contract_delete module=service status=ok id={id} business_id={tenant}");
        Ok(())
    }

    fn insert(&self, draft: ContractDraft, tenant: TenantId) -> RepoResult<ContractRecord> {
        let record = draft.into_record(tenant, Utc::now());
        self.repo.insert_contract(&record)?;
        info!(
            "event=contract_create module=service status=ok id={} business_id={}",
            record.id, record.tenant
        );
        Ok(record)
    }
}
