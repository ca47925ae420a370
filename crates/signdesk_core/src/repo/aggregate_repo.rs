//! Persistence for the contract-management aggregate singleton.
//!
//! # Invariants
//! - Exactly one row exists under `AGGREGATE_KEY` once any operation has run.
//! - Reference-list replacement and patch application are atomic
//!   read-modify-write cycles.

use crate::model::aggregate::{AggregatePatch, AggregateRecord, AGGREGATE_KEY};
use crate::model::ids::RecordId;
use crate::repo::collection::ensure_schema;
use crate::repo::error::RepoResult;
use crate::repo::singleton::{upsert_singleton, SingletonTable, Upserted};
use rusqlite::Connection;

const AGGREGATE_TABLE: SingletonTable = SingletonTable {
    table: "contract_management",
    key_column: "key",
};

/// Repository interface for the aggregate singleton.
pub trait AggregateRepository {
    /// Returns the aggregate, creating the default one on first access.
    fn get_or_init(&self) -> RepoResult<AggregateRecord>;
    /// Applies a validated patch, creating the aggregate first if needed.
    fn update_aggregate(&self, patch: &AggregatePatch) -> RepoResult<AggregateRecord>;
    /// Overwrites both reference lists; counters and settings stay as stored.
    fn replace_references(
        &self,
        documents: Vec<RecordId>,
        contracts: Vec<RecordId>,
    ) -> RepoResult<AggregateRecord>;
}

pub struct SqliteAggregateRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteAggregateRepository<'conn> {
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_schema(conn)?;
        Ok(Self { conn })
    }

    fn upsert(
        &self,
        mutate: impl FnOnce(&mut AggregateRecord) -> RepoResult<bool>,
    ) -> RepoResult<AggregateRecord> {
        let Upserted { record, created } = upsert_singleton(
            self.conn,
            AGGREGATE_TABLE,
            AGGREGATE_KEY,
            AggregateRecord::new_default,
            mutate,
        )?;
        if created {
            log::info!("event=aggregate_init module=repo status=ok id={}", record.id);
        }
        Ok(record)
    }
}

impl AggregateRepository for SqliteAggregateRepository<'_> {
    fn get_or_init(&self) -> RepoResult<AggregateRecord> {
        self.upsert(|_| Ok(false))
    }

    fn update_aggregate(&self, patch: &AggregatePatch) -> RepoResult<AggregateRecord> {
        patch.validate()?;
        self.upsert(|record| {
            patch.apply_to(record);
            Ok(true)
        })
    }

    fn replace_references(
        &self,
        documents: Vec<RecordId>,
        contracts: Vec<RecordId>,
    ) -> RepoResult<AggregateRecord> {
        self.upsert(move |record| {
            let changed = record.documents != documents || record.contracts != contracts;
            record.documents = documents;
            record.contracts = contracts;
            Ok(changed)
        })
    }
}
