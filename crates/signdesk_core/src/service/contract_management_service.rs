//! Contract-management aggregate service: get-or-init, update, populate and
//! sync.
//!
//! # Responsibility
//! - Expose the aggregate singleton through atomic repository upserts.
//! - Resolve reference lists into full records on read (lossy join).
//! - Recompute reference lists from the authoritative collections on sync.
//!
//! # Invariants
//! - Populate never fails because of dangling references; missing ids are
//!   dropped from the view.
//! - Sync replaces only `documents` and `contracts`; counters, stats and
//!   embedded settings keep their stored values.
//! - The aggregate is deployment-wide; sync reads every tenant's ids.

use crate::model::aggregate::{AggregatePatch, AggregateRecord, PopulatedView};
use crate::repo::aggregate_repo::AggregateRepository;
use crate::repo::contract_repo::ContractRepository;
use crate::repo::document_repo::DocumentRepository;
use crate::repo::RepoResult;
use log::info;
use serde_json::Value;
use std::time::Instant;

/// Orchestrates the aggregate store and the population engine.
pub struct ContractManagementService<A, D, C>
where
    A: AggregateRepository,
    D: DocumentRepository,
    C: ContractRepository,
{
    aggregates: A,
    documents: D,
    contracts: C,
}

impl<A, D, C> ContractManagementService<A, D, C>
where
    A: AggregateRepository,
    D: DocumentRepository,
    C: ContractRepository,
{
    pub fn new(aggregates: A, documents: D, contracts: C) -> Self {
        Self {
            aggregates,
            documents,
            contracts,
        }
    }

    /// Returns the raw aggregate, creating the default one on first access.
    pub fn get_or_init(&self) -> RepoResult<AggregateRecord> {
        self.aggregates.get_or_init()
    }

    /// Returns the populated aggregate, creating the default one on first
    /// access.
    pub fn get_or_init_populated(&self) -> RepoResult<PopulatedView> {
        let record = self.aggregates.get_or_init()?;
        self.populate(record)
    }

    /// Replaces each top-level field present in `raw` and returns the
    /// populated result. Reference lists are not patchable here; use `sync`.
    pub fn update(&self, raw: &Value) -> RepoResult<PopulatedView> {
        let patch = AggregatePatch::from_json(raw)?;
        let record = self.aggregates.update_aggregate(&patch)?;
        info!(
            "event=aggregate_update module=service status=ok id={}",
            record.id
        );
        self.populate(record)
    }

    /// Resolves `record`'s reference lists into full records.
    ///
    /// The resolved lists keep reference order and may be shorter than the
    /// reference lists.
    pub fn populate(&self, record: AggregateRecord) -> RepoResult<PopulatedView> {
        let documents = self.documents.find_documents_by_ids(&record.documents)?;
        let contracts = self.contracts.find_contracts_by_ids(&record.contracts)?;

        let dropped = record.documents.len().saturating_sub(documents.len())
            + record.contracts.len().saturating_sub(contracts.len());
        if dropped > 0 {
            info!(
                "event=aggregate_populate module=service status=ok dangling_refs={dropped}"
            );
        }

        Ok(PopulatedView::from_parts(record, documents, contracts))
    }

    /// Rebuilds the reference lists from every stored document and contract
    /// and returns the updated, unpopulated record.
    pub fn sync(&self) -> RepoResult<AggregateRecord> {
        let started_at = Instant::now();
        let document_ids = self.documents.list_document_ids()?;
        let contract_ids = self.contracts.list_contract_ids()?;
        let (document_count, contract_count) = (document_ids.len(), contract_ids.len());

        let record = self
            .aggregates
            .replace_references(document_ids, contract_ids)?;
        info!(
            "event=aggregate_sync module=service status=ok documents={document_count} contracts={contract_count} duration_ms={}",
            started_at.elapsed().as_millis()
        );
        Ok(record)
    }

    /// `sync` followed by `populate`.
    pub fn sync_and_populate(&self) -> RepoResult<PopulatedView> {
        let record = self.sync()?;
        self.populate(record)
    }
}
