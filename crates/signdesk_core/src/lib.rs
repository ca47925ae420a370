//! Core domain logic for SignDesk document and contract management.
//! This crate is the single source of truth for schema and tenancy invariants.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use db::{open_db, open_db_in_memory, DbError, DbResult};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::aggregate::{AggregatePatch, AggregateRecord, PopulatedView, AGGREGATE_KEY};
pub use model::contract::{ContractDraft, ContractPatch, ContractRecord, ContractStatus};
pub use model::document::{
    DocumentDraft, DocumentPatch, DocumentRecord, DocumentStatus, DocumentType, UploadRequest,
};
pub use model::element::{validate_element, CanvasElement, ElementKind, Page, SchemaError};
pub use model::ids::{parse_record_id, IdentityError, RecordId, TenantId};
pub use model::settings::{SettingsPatch, SettingsRecord};
pub use model::validation::ValidationError;
pub use repo::aggregate_repo::{AggregateRepository, SqliteAggregateRepository};
pub use repo::contract_repo::{ContractRepository, SqliteContractRepository};
pub use repo::document_repo::{DocumentRepository, SqliteDocumentRepository};
pub use repo::settings_repo::{SettingsRepository, SqliteSettingsRepository};
pub use repo::{RepoError, RepoResult, MAX_LIST_LIMIT};
pub use service::contract_management_service::ContractManagementService;
pub use service::contract_service::ContractService;
pub use service::document_service::DocumentService;
pub use service::settings_service::SettingsService;

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
