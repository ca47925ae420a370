//! Tenant settings model and the settings sub-objects shared with the
//! aggregate record.
//!
//! # Invariants
//! - One settings record per tenant.
//! - Sub-objects are replaced as a whole on update; keys missing from a
//!   supplied sub-object take the defaults below, not the stored values.

use super::ids::{RecordId, TenantId};
use super::validation::ValidationError;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

pub const DEFAULT_EMAIL_TEMPLATE: &str = "default";
pub const DEFAULT_DAYS_BEFORE_DUE_DATE: i64 = 3;

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct IdentityVerificationSettings {
    /// Persisted under its historical spelling.
    #[serde(rename = "isVarifyOn", alias = "isVerifyOn")]
    pub is_verify_on: bool,
    pub verification_method: String,
    pub is_require_all_signers: bool,
    pub is_require_phone: bool,
}

/// Notification policy applied to every document of the scope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GlobalDocumentSettings {
    pub sender_name: String,
    pub sender_email: String,
    pub email_subject: String,
    pub email_template: String,
    pub redirect_date_notification: bool,
    pub due_date_notification: bool,
    pub completion_notification: bool,
    pub reminder_notification: bool,
    pub days_before_due_date: i64,
}

impl Default for GlobalDocumentSettings {
    fn default() -> Self {
        Self {
            sender_name: String::new(),
            sender_email: String::new(),
            email_subject: String::new(),
            email_template: DEFAULT_EMAIL_TEMPLATE.to_string(),
            redirect_date_notification: false,
            due_date_notification: false,
            completion_notification: false,
            reminder_notification: false,
            days_before_due_date: DEFAULT_DAYS_BEFORE_DUE_DATE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BrandingSettings {
    pub sender_name: String,
    pub sender_email: String,
    pub email_subject_line: String,
    pub email_message: String,
    pub cta_button_text: String,
    pub footer_text: String,
    pub company_name: String,
    pub primary_color: String,
    pub secondary_color: String,
    pub accent_color: String,
    pub logo: Option<String>,
}

/// Persisted per-tenant settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsRecord {
    #[serde(rename = "_id", alias = "id")]
    pub id: RecordId,
    #[serde(rename = "business_id")]
    pub tenant: TenantId,
    #[serde(default)]
    pub identity_verification: IdentityVerificationSettings,
    #[serde(default)]
    pub global_document: GlobalDocumentSettings,
    #[serde(default)]
    pub branding: BrandingSettings,
}

impl SettingsRecord {
    /// Default settings for a tenant seen for the first time.
    pub fn new_default(tenant: TenantId) -> Self {
        Self {
            id: Uuid::new_v4(),
            tenant,
            identity_verification: IdentityVerificationSettings::default(),
            global_document: GlobalDocumentSettings::default(),
            branding: BrandingSettings::default(),
        }
    }
}

/// Whole-sub-object replacement for tenant settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsPatch {
    #[serde(default)]
    pub identity_verification: Option<IdentityVerificationSettings>,
    #[serde(default)]
    pub global_document: Option<GlobalDocumentSettings>,
    #[serde(default)]
    pub branding: Option<BrandingSettings>,
}

impl SettingsPatch {
    pub fn from_json(raw: &Value) -> Result<Self, ValidationError> {
        if !raw.is_object() {
            return Err(ValidationError::invalid_field("settings", "expected an object"));
        }
        Self::deserialize(raw).map_err(|err| ValidationError::invalid_field("settings", err))
    }

    pub fn apply_to(&self, record: &mut SettingsRecord) {
        if let Some(identity) = &self.identity_verification {
            record.identity_verification = identity.clone();
        }
        if let Some(global) = &self.global_document {
            record.global_document = global.clone();
        }
        if let Some(branding) = &self.branding {
            record.branding = branding.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{GlobalDocumentSettings, IdentityVerificationSettings, SettingsPatch};
    use serde_json::json;

    #[test]
    fn global_document_defaults_match_policy() {
        let settings = GlobalDocumentSettings::default();
        assert_eq!(settings.email_template, "default");
        assert_eq!(settings.days_before_due_date, 3);
        assert!(!settings.reminder_notification);
    }

    #[test]
    fn identity_verification_keeps_persisted_spelling() {
        let settings = IdentityVerificationSettings {
            is_verify_on: true,
            ..IdentityVerificationSettings::default()
        };
        let value = serde_json::to_value(&settings).unwrap();
        assert_eq!(value["isVarifyOn"], json!(true));

        let parsed: IdentityVerificationSettings =
            serde_json::from_value(json!({ "isVerifyOn": true })).unwrap();
        assert!(parsed.is_verify_on);
    }

    #[test]
    fn partial_sub_object_falls_back_to_defaults() {
        let patch = SettingsPatch::from_json(&json!({
            "globalDocument": { "senderName": "Ops" }
        }))
        .unwrap();
        let global = patch.global_document.unwrap();
        assert_eq!(global.sender_name, "Ops");
        assert_eq!(global.days_before_due_date, 3);
        assert!(patch.branding.is_none());
    }
}
