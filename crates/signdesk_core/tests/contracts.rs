use rusqlite::Connection;
use serde_json::json;
use signdesk_core::db::open_db_in_memory;
use signdesk_core::{
    ContractDraft, ContractService, ContractStatus, RepoError, SqliteContractRepository,
    ValidationError,
};

fn service(conn: &Connection) -> ContractService<SqliteContractRepository<'_>> {
    ContractService::new(SqliteContractRepository::try_new(conn).unwrap())
}

#[test]
fn create_applies_defaults_and_forces_draft() {
    let conn = open_db_in_memory().unwrap();
    let created = service(&conn)
        .create(&json!({ "name": "Hosting", "status": "active" }), "t1")
        .unwrap();

    assert_eq!(created.status, ContractStatus::Draft);
    assert_eq!(created.currency, "USD");
    assert_eq!(created.contract_type, "Service Contract");
    assert_eq!(created.value, 0.0);
    assert_eq!(created.renewal_period, 0);
    assert!(!created.auto_renewal);
}

#[test]
fn create_requires_a_non_blank_name() {
    let conn = open_db_in_memory().unwrap();
    let contracts = service(&conn);

    assert!(matches!(
        contracts.create(&json!({ "value": 10 }), "t1"),
        Err(RepoError::Validation(ValidationError::InvalidField { .. }))
    ));
    assert!(matches!(
        contracts.create(&json!({ "name": "  " }), "t1"),
        Err(RepoError::Validation(ValidationError::EmptyName))
    ));
}

#[test]
fn update_is_tenant_scoped_and_merges_present_fields() {
    let conn = open_db_in_memory().unwrap();
    let contracts = service(&conn);
    let mut draft = ContractDraft::new("Support");
    draft.payment_terms = Some("net 30".to_string());
    let created = contracts.create_draft(draft, "t1").unwrap();
    let id = created.id.to_string();

    let patch = json!({ "status": "active", "value": 4800.5, "autoRenewal": true });
    let updated = contracts.update(&id, "t1", &patch).unwrap();
    assert_eq!(updated.status, ContractStatus::Active);
    assert_eq!(updated.value, 4800.5);
    assert!(updated.auto_renewal);
    assert_eq!(updated.payment_terms.as_deref(), Some("net 30"));
    assert_eq!(updated.date, created.date);

    assert!(matches!(
        contracts.update(&id, "t2", &patch),
        Err(RepoError::NotFound(_))
    ));
    assert!(matches!(contracts.get(&id, "t2"), Err(RepoError::NotFound(_))));

    let again = contracts.update(&id, "t1", &patch).unwrap();
    assert_eq!(again.value, updated.value);
    assert_eq!(again.status, updated.status);
}

#[test]
fn explicit_null_clears_optional_terms() {
    let conn = open_db_in_memory().unwrap();
    let contracts = service(&conn);
    let created = contracts
        .create(
            &json!({ "name": "Lease", "endDate": "2027-01-01", "termsAndConditions": "standard" }),
            "t1",
        )
        .unwrap();

    let updated = contracts
        .update(&created.id.to_string(), "t1", &json!({ "endDate": null }))
        .unwrap();
    assert_eq!(updated.end_date, None);
    assert_eq!(updated.terms_and_conditions.as_deref(), Some("standard"));
}

#[test]
fn list_and_delete() {
    let conn = open_db_in_memory().unwrap();
    let contracts = service(&conn);
    let kept = contracts.create(&json!({ "name": "A" }), "t1").unwrap();
    let removed = contracts.create(&json!({ "name": "B" }), "t1").unwrap();
    contracts.create(&json!({ "name": "C" }), "t2").unwrap();

    contracts.delete(&removed.id.to_string(), "t1").unwrap();

    let listed = contracts.list("t1").unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, kept.id);
    assert!(matches!(contracts.list(""), Err(RepoError::TenantRequired)));
}

#[test]
fn invalid_status_value_is_a_validation_error() {
    let conn = open_db_in_memory().unwrap();
    let contracts = service(&conn);
    let created = contracts.create(&json!({ "name": "A" }), "t1").unwrap();

    let err = contracts
        .update(&created.id.to_string(), "t1", &json!({ "status": "cancelled" }))
        .unwrap_err();
    assert_eq!(err.code(), "VALIDATION_ERROR");
}
