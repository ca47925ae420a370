//! Per-tenant settings singleton persistence.

use crate::model::ids::TenantId;
use crate::model::settings::{SettingsPatch, SettingsRecord};
use crate::repo::collection::ensure_schema;
use crate::repo::error::RepoResult;
use crate::repo::singleton::{upsert_singleton, SingletonTable};
use rusqlite::Connection;

const SETTINGS_TABLE: SingletonTable = SingletonTable {
    table: "settings",
    key_column: "business_id",
};

pub trait SettingsRepository {
    fn get_or_init_settings(&self, tenant: &TenantId) -> RepoResult<SettingsRecord>;
    fn update_settings(&self, tenant: &TenantId, patch: &SettingsPatch)
        -> RepoResult<SettingsRecord>;
}

pub struct SqliteSettingsRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteSettingsRepository<'conn> {
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_schema(conn)?;
        Ok(Self { conn })
    }
}

impl SettingsRepository for SqliteSettingsRepository<'_> {
    fn get_or_init_settings(&self, tenant: &TenantId) -> RepoResult<SettingsRecord> {
        let upserted = upsert_singleton(
            self.conn,
            SETTINGS_TABLE,
            tenant.as_str(),
            || SettingsRecord::new_default(tenant.clone()),
            |_| Ok(false),
        )?;
        Ok(upserted.record)
    }

    fn update_settings(
        &self,
        tenant: &TenantId,
        patch: &SettingsPatch,
    ) -> RepoResult<SettingsRecord> {
        let upserted = upsert_singleton(
            self.conn,
            SETTINGS_TABLE,
            tenant.as_str(),
            || SettingsRecord::new_default(tenant.clone()),
            |record: &mut SettingsRecord| {
                patch.apply_to(record);
                Ok(true)
            },
        )?;
        Ok(upserted.record)
    }
}
