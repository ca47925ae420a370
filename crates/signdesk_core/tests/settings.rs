use rusqlite::Connection;
use serde_json::json;
use signdesk_core::db::open_db_in_memory;
use signdesk_core::{RepoError, SettingsService, SqliteSettingsRepository};

fn service(conn: &Connection) -> SettingsService<SqliteSettingsRepository<'_>> {
    SettingsService::new(SqliteSettingsRepository::try_new(conn).unwrap())
}

#[test]
fn first_read_creates_tenant_defaults_once() {
    let conn = open_db_in_memory().unwrap();
    let settings = service(&conn);

    let first = settings.get("t1").unwrap();
    assert_eq!(first.tenant.as_str(), "t1");
    assert_eq!(first.global_document.email_template, "default");
    assert_eq!(first.global_document.days_before_due_date, 3);
    assert_eq!(first.branding.logo, None);
    assert!(!first.identity_verification.is_verify_on);

    let second = settings.get(" t1 ").unwrap();
    assert_eq!(first, second);

    let rows: i64 = conn
        .query_row("SELECT COUNT(*) FROM settings;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(rows, 1);
}

#[test]
fn tenants_get_independent_settings() {
    let conn = open_db_in_memory().unwrap();
    let settings = service(&conn);

    settings
        .update("t1", &json!({ "branding": { "companyName": "Acme" } }))
        .unwrap();
    let other = settings.get("t2").unwrap();

    assert_eq!(other.branding.company_name, "");
    assert_ne!(other.id, settings.get("t1").unwrap().id);
}

#[test]
fn update_replaces_present_sub_objects_only() {
    let conn = open_db_in_memory().unwrap();
    let settings = service(&conn);

    settings
        .update(
            "t1",
            &json!({
                "globalDocument": { "senderName": "Ops", "daysBeforeDueDate": 5 },
                "branding": { "companyName": "Acme", "primaryColor": "#123456" }
            }),
        )
        .unwrap();
    let updated = settings
        .update("t1", &json!({ "branding": { "accentColor": "#fff" } }))
        .unwrap();

    assert_eq!(updated.global_document.sender_name, "Ops");
    assert_eq!(updated.global_document.days_before_due_date, 5);
    assert_eq!(updated.global_document.email_template, "default");
    assert_eq!(updated.branding.accent_color, "#fff");
    assert_eq!(updated.branding.company_name, "");
}

#[test]
fn identity_flag_accepts_both_spellings_and_persists_historical_one() {
    let conn = open_db_in_memory().unwrap();
    let settings = service(&conn);

    let updated = settings
        .update("t1", &json!({ "identityVerification": { "isVerifyOn": true } }))
        .unwrap();
    assert!(updated.identity_verification.is_verify_on);

    let value = serde_json::to_value(&updated).unwrap();
    assert_eq!(value["identityVerification"]["isVarifyOn"], json!(true));
    assert_eq!(value["business_id"], json!("t1"));
}

#[test]
fn blank_tenant_and_bad_payload_are_rejected() {
    let conn = open_db_in_memory().unwrap();
    let settings = service(&conn);

    assert!(matches!(settings.get(""), Err(RepoError::TenantRequired)));
    let err = settings
        .update("t1", &json!({ "branding": "blue" }))
        .unwrap_err();
    assert_eq!(err.code(), "VALIDATION_ERROR");
}
