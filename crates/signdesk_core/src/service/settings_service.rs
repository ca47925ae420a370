//! Per-tenant settings service.

use crate::model::ids::TenantId;
use crate::model::settings::{SettingsPatch, SettingsRecord};
use crate::repo::settings_repo::SettingsRepository;
use crate::repo::RepoResult;
use log::info;
use serde_json::Value;

pub struct SettingsService<R: SettingsRepository> {
    repo: R,
}

impl<R: SettingsRepository> SettingsService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Returns the tenant's settings, creating defaults on first read.
    pub fn get(&self, tenant: &str) -> RepoResult<SettingsRecord> {
        let tenant = TenantId::parse(tenant)?;
        self.repo.get_or_init_settings(&tenant)
    }

    /// Replaces each sub-object present in `raw` as a whole.
    pub fn update(&self, tenant: &str, raw: &Value) -> RepoResult<SettingsRecord> {
        let tenant = TenantId::parse(tenant)?;
        let patch = SettingsPatch::from_json(raw)?;
        let record = self.repo.update_settings(&tenant, &patch)?;
        info!("event=settings_update module=service status=ok business_id={tenant}");
        Ok(record)
    }
}
