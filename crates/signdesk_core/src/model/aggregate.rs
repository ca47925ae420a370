//! Contract-management aggregate: the denormalized singleton joining
//! document/contract identifiers with rollup counters and settings.
//!
//! # Invariants
//! - One aggregate per deployment, stored under `AGGREGATE_KEY`.
//! - `documents` / `contracts` hold references only; `PopulatedView` holds
//!   the resolved records.
//! - Counters and stats change only through `AggregatePatch`; sync never
//!   recomputes them.

use super::contract::ContractRecord;
use super::document::DocumentRecord;
use super::ids::RecordId;
use super::settings::{BrandingSettings, GlobalDocumentSettings, IdentityVerificationSettings};
use super::validation::ValidationError;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// Storage key of the aggregate singleton.
pub const AGGREGATE_KEY: &str = "global";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentsFilters {
    pub all: i64,
    pub draft: i64,
    pub waiting: i64,
    pub completed: i64,
    pub archived: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ContractsFilters {
    pub all: i64,
    pub active: i64,
    pub expired: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Stats {
    pub total_documents: i64,
    pub active_contracts: i64,
    pub pending_signatures: i64,
    pub contract_value: f64,
}

fn default_scope() -> String {
    AGGREGATE_KEY.to_string()
}

/// Reference-only aggregate record as persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregateRecord {
    #[serde(rename = "_id", alias = "id")]
    pub id: RecordId,
    #[serde(rename = "business_id", default = "default_scope")]
    pub scope: String,
    #[serde(default)]
    pub documents: Vec<RecordId>,
    #[serde(default)]
    pub contracts: Vec<RecordId>,
    #[serde(default)]
    pub documents_filters: DocumentsFilters,
    #[serde(default)]
    pub contracts_filters: ContractsFilters,
    #[serde(default)]
    pub stats: Stats,
    #[serde(default)]
    pub identity_verification_settings: IdentityVerificationSettings,
    #[serde(default)]
    pub global_document_settings: GlobalDocumentSettings,
    #[serde(default)]
    pub branding_customization_settings: BrandingSettings,
}

impl AggregateRecord {
    /// Empty aggregate: no references, zero counters, default settings.
    pub fn new_default() -> Self {
        Self {
            id: Uuid::new_v4(),
            scope: default_scope(),
            documents: Vec::new(),
            contracts: Vec::new(),
            documents_filters: DocumentsFilters::default(),
            contracts_filters: ContractsFilters::default(),
            stats: Stats::default(),
            identity_verification_settings: IdentityVerificationSettings::default(),
            global_document_settings: GlobalDocumentSettings::default(),
            branding_customization_settings: BrandingSettings::default(),
        }
    }
}

/// Top-level replacement for the aggregate. Each present field replaces the
/// stored field wholesale; nested objects are never deep-merged.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregatePatch {
    #[serde(default)]
    pub documents_filters: Option<DocumentsFilters>,
    #[serde(default)]
    pub contracts_filters: Option<ContractsFilters>,
    #[serde(default)]
    pub stats: Option<Stats>,
    #[serde(default)]
    pub identity_verification_settings: Option<IdentityVerificationSettings>,
    #[serde(default)]
    pub global_document_settings: Option<GlobalDocumentSettings>,
    #[serde(default)]
    pub branding_customization_settings: Option<BrandingSettings>,
}

impl AggregatePatch {
    pub fn from_json(raw: &Value) -> Result<Self, ValidationError> {
        if !raw.is_object() {
            return Err(ValidationError::invalid_field(
                "contract_management",
                "expected an object",
            ));
        }
        Self::deserialize(raw)
            .map_err(|err| ValidationError::invalid_field("contract_management", err))
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self
            .stats
            .is_some_and(|stats| !stats.contract_value.is_finite())
        {
            return Err(ValidationError::invalid_field(
                "stats.contractValue",
                "must be a finite number",
            ));
        }
        Ok(())
    }

    pub fn apply_to(&self, record: &mut AggregateRecord) {
        if let Some(filters) = self.documents_filters {
            record.documents_filters = filters;
        }
        if let Some(filters) = self.contracts_filters {
            record.contracts_filters = filters;
        }
        if let Some(stats) = self.stats {
            record.stats = stats;
        }
        if let Some(settings) = &self.identity_verification_settings {
            record.identity_verification_settings = settings.clone();
        }
        if let Some(settings) = &self.global_document_settings {
            record.global_document_settings = settings.clone();
        }
        if let Some(settings) = &self.branding_customization_settings {
            record.branding_customization_settings = settings.clone();
        }
    }
}

/// Aggregate with its reference lists resolved into full records.
///
/// Each list may be shorter than the reference list it came from: ids with
/// no stored record are dropped.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PopulatedView {
    #[serde(rename = "_id")]
    pub id: RecordId,
    #[serde(rename = "business_id")]
    pub scope: String,
    pub documents: Vec<DocumentRecord>,
    pub contracts: Vec<ContractRecord>,
    pub documents_filters: DocumentsFilters,
    pub contracts_filters: ContractsFilters,
    pub stats: Stats,
    pub identity_verification_settings: IdentityVerificationSettings,
    pub global_document_settings: GlobalDocumentSettings,
    pub branding_customization_settings: BrandingSettings,
}

impl PopulatedView {
    pub fn from_parts(
        record: AggregateRecord,
        documents: Vec<DocumentRecord>,
        contracts: Vec<ContractRecord>,
    ) -> Self {
        Self {
            id: record.id,
            scope: record.scope,
            documents,
            contracts,
            documents_filters: record.documents_filters,
            contracts_filters: record.contracts_filters,
            stats: record.stats,
            identity_verification_settings: record.identity_verification_settings,
            global_document_settings: record.global_document_settings,
            branding_customization_settings: record.branding_customization_settings,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{AggregatePatch, AggregateRecord};
    use serde_json::json;

    #[test]
    fn default_record_is_zeroed() {
        let record = AggregateRecord::new_default();
        assert_eq!(record.scope, "global");
        assert!(record.documents.is_empty());
        assert_eq!(record.documents_filters.all, 0);
        assert_eq!(record.stats.contract_value, 0.0);
        assert_eq!(record.branding_customization_settings.primary_color, "");
    }

    #[test]
    fn patch_replaces_sub_objects_wholesale() {
        let mut record = AggregateRecord::new_default();
        record.branding_customization_settings.company_name = "Acme".to_string();
        record.branding_customization_settings.primary_color = "#000".to_string();

        let patch = AggregatePatch::from_json(&json!({
            "brandingCustomizationSettings": { "primaryColor": "#fff" }
        }))
        .unwrap();
        patch.apply_to(&mut record);

        assert_eq!(record.branding_customization_settings.primary_color, "#fff");
        assert_eq!(record.branding_customization_settings.company_name, "");
    }
}
