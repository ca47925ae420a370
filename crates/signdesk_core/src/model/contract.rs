//! Contract record model.
//!
//! # Invariants
//! - Newly created contracts always start in `ContractStatus::Draft`.
//! - `renewalPeriod` / `noticePeriod` are whole days.

use super::explicit_null;
use super::ids::{RecordId, TenantId};
use super::validation::ValidationError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

pub const DEFAULT_CURRENCY: &str = "USD";
pub const DEFAULT_CONTRACT_TYPE: &str = "Service Contract";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContractStatus {
    Active,
    #[default]
    Draft,
    Expired,
}

impl ContractStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Draft => "draft",
            Self::Expired => "expired",
        }
    }
}

/// Persisted contract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractRecord {
    #[serde(rename = "_id", alias = "id")]
    pub id: RecordId,
    pub name: String,
    #[serde(default)]
    pub status: ContractStatus,
    /// Currency amount in `currency` units.
    #[serde(default)]
    pub value: f64,
    #[serde(default = "default_currency")]
    pub currency: String,
    pub date: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default)]
    pub renewal_period: i64,
    #[serde(default)]
    pub notice_period: i64,
    #[serde(default)]
    pub auto_renewal: bool,
    #[serde(default)]
    pub terms_and_conditions: Option<String>,
    #[serde(default)]
    pub payment_terms: Option<String>,
    #[serde(default = "default_contract_type")]
    pub contract_type: String,
    #[serde(rename = "business_id")]
    pub tenant: TenantId,
}

impl ContractRecord {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::EmptyName);
        }
        if !self.value.is_finite() {
            return Err(ValidationError::invalid_field(
                "value",
                "must be a finite number",
            ));
        }
        Ok(())
    }
}

fn default_currency() -> String {
    DEFAULT_CURRENCY.to_string()
}

fn default_contract_type() -> String {
    DEFAULT_CONTRACT_TYPE.to_string()
}

/// Create input for a new contract. `status` and `business_id` are ignored.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractDraft {
    pub name: String,
    #[serde(default)]
    pub value: f64,
    #[serde(default = "default_currency")]
    pub currency: String,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default)]
    pub renewal_period: i64,
    #[serde(default)]
    pub notice_period: i64,
    #[serde(default)]
    pub auto_renewal: bool,
    #[serde(default)]
    pub terms_and_conditions: Option<String>,
    #[serde(default)]
    pub payment_terms: Option<String>,
    #[serde(default = "default_contract_type")]
    pub contract_type: String,
}

impl ContractDraft {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: 0.0,
            currency: default_currency(),
            start_date: None,
            end_date: None,
            renewal_period: 0,
            notice_period: 0,
            auto_renewal: false,
            terms_and_conditions: None,
            payment_terms: None,
            contract_type: default_contract_type(),
        }
    }

    pub fn from_json(raw: &Value) -> Result<Self, ValidationError> {
        Self::deserialize(raw).map_err(|err| ValidationError::invalid_field("contract", err))
    }

    pub fn into_record(self, tenant: TenantId, now: DateTime<Utc>) -> ContractRecord {
        ContractRecord {
            id: Uuid::new_v4(),
            name: self.name,
            status: ContractStatus::Draft,
            value: self.value,
            currency: self.currency,
            date: now,
            updated_at: now,
            start_date: self.start_date,
            end_date: self.end_date,
            renewal_period: self.renewal_period,
            notice_period: self.notice_period,
            auto_renewal: self.auto_renewal,
            terms_and_conditions: self.terms_and_conditions,
            payment_terms: self.payment_terms,
            contract_type: self.contract_type,
            tenant,
        }
    }
}

/// Partial update for a contract.
///
/// Optional text fields (`startDate`, `endDate`, `termsAndConditions`,
/// `paymentTerms`) accept an explicit `null` to clear the stored value.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractPatch {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub status: Option<ContractStatus>,
    #[serde(default)]
    pub value: Option<f64>,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default, deserialize_with = "explicit_null")]
    pub start_date: Option<Option<String>>,
    #[serde(default, deserialize_with = "explicit_null")]
    pub end_date: Option<Option<String>>,
    #[serde(default)]
    pub renewal_period: Option<i64>,
    #[serde(default)]
    pub notice_period: Option<i64>,
    #[serde(default)]
    pub auto_renewal: Option<bool>,
    #[serde(default, deserialize_with = "explicit_null")]
    pub terms_and_conditions: Option<Option<String>>,
    #[serde(default, deserialize_with = "explicit_null")]
    pub payment_terms: Option<Option<String>>,
    #[serde(default)]
    pub contract_type: Option<String>,
}

impl ContractPatch {
    pub fn from_json(raw: &Value) -> Result<Self, ValidationError> {
        if !raw.is_object() {
            return Err(ValidationError::invalid_field("contract", "expected an object"));
        }
        Self::deserialize(raw).map_err(|err| ValidationError::invalid_field("contract", err))
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn apply_to(&self, record: &mut ContractRecord) {
        if let Some(name) = &self.name {
            record.name = name.clone();
        }
        if let Some(status) = self.status {
            record.status = status;
        }
        if let Some(value) = self.value {
            record.value = value;
        }
        if let Some(currency) = &self.currency {
            record.currency = currency.clone();
        }
        if let Some(start_date) = &self.start_date {
            record.start_date = start_date.clone();
        }
        if let Some(end_date) = &self.end_date {
            record.end_date = end_date.clone();
        }
        if let Some(renewal_period) = self.renewal_period {
            record.renewal_period = renewal_period;
        }
        if let Some(notice_period) = self.notice_period {
            record.notice_period = notice_period;
        }
        if let Some(auto_renewal) = self.auto_renewal {
            record.auto_renewal = auto_renewal;
        }
        if let Some(terms) = &self.terms_and_conditions {
            record.terms_and_conditions = terms.clone();
        }
        if let Some(payment_terms) = &self.payment_terms {
            record.payment_terms = payment_terms.clone();
        }
        if let Some(contract_type) = &self.contract_type {
            record.contract_type = contract_type.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ContractDraft, ContractPatch, ContractStatus};
    use crate::model::ids::TenantId;
    use crate::model::validation::ValidationError;
    use chrono::Utc;
    use serde_json::json;

    #[test]
    fn draft_applies_defaults() {
        let draft = ContractDraft::from_json(&json!({ "name": "Lease", "status": "active" })).unwrap();
        let record = draft.into_record(TenantId::parse("t1").unwrap(), Utc::now());
        assert_eq!(record.status, ContractStatus::Draft);
        assert_eq!(record.currency, "USD");
        assert_eq!(record.contract_type, "Service Contract");
        assert_eq!(record.value, 0.0);
        assert!(!record.auto_renewal);
    }

    #[test]
    fn draft_requires_name() {
        assert!(ContractDraft::from_json(&json!({ "value": 10 })).is_err());
    }

    #[test]
    fn blank_name_fails_record_validation() {
        let record =
            ContractDraft::new("   ").into_record(TenantId::parse("t1").unwrap(), Utc::now());
        assert_eq!(record.validate(), Err(ValidationError::EmptyName));
    }

    #[test]
    fn patch_only_touches_present_fields() {
        let mut record =
            ContractDraft::new("Lease").into_record(TenantId::parse("t1").unwrap(), Utc::now());
        record.payment_terms = Some("net 30".to_string());

        let patch = ContractPatch::from_json(&json!({ "value": 1200.5, "status": "active" })).unwrap();
        patch.apply_to(&mut record);
        assert_eq!(record.value, 1200.5);
        assert_eq!(record.status, ContractStatus::Active);
        assert_eq!(record.payment_terms.as_deref(), Some("net 30"));
        assert_eq!(record.name, "Lease");
    }
}
