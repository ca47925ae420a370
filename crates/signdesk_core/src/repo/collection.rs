//! Generic tenant-scoped JSON collection over SQLite.
//!
//! # Responsibility
//! - Store records as JSON bodies keyed by `id` and filtered by
//!   `business_id`.
//! - Provide the point lookup, tenant listing, scoped conditional update,
//!   scoped delete, id-set lookup and id-only projection used by the
//!   document and contract repositories.
//!
//! # Invariants
//! - Every tenant-scoped statement filters on `id` and `business_id`
//!   together.
//! - Scoped updates read, mutate, validate and write inside one IMMEDIATE
//!   transaction; any error drops the transaction and nothing is written.
//! - Read paths reject undecodable bodies instead of skipping them.

use crate::db::migrations::latest_version;
use crate::model::ids::{RecordId, TenantId};
use crate::repo::error::{RepoError, RepoResult};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, OptionalExtension, Transaction, TransactionBehavior};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::{HashMap, HashSet};
use uuid::Uuid;

/// Upper bound on ids bound into one `IN (...)` lookup.
const ID_LOOKUP_CHUNK: usize = 500;

/// A record stored in a tenant-scoped collection table.
pub trait StoredRecord: Serialize + DeserializeOwned {
    /// Table name; also used in error messages.
    const COLLECTION: &'static str;

    fn record_id(&self) -> RecordId;
    fn tenant(&self) -> &TenantId;
}

/// Fails when the connection has not been migrated to the expected version.
pub(crate) fn ensure_schema(conn: &Connection) -> RepoResult<()> {
    let actual_version: u32 = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
    let expected_version = latest_version();
    if actual_version != expected_version {
        return Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }
    Ok(())
}

/// Begins an IMMEDIATE transaction on a shared connection reference.
pub(crate) fn begin_immediate(conn: &Connection) -> RepoResult<Transaction<'_>> {
    Ok(Transaction::new_unchecked(
        conn,
        TransactionBehavior::Immediate,
    )?)
}

pub(crate) fn encode_body<T: Serialize>(collection: &str, record: &T) -> RepoResult<String> {
    serde_json::to_string(record)
        .map_err(|err| RepoError::InvalidData(format!("cannot encode {collection} body: {err}")))
}

pub(crate) fn decode_body<T: DeserializeOwned>(collection: &str, body: &str) -> RepoResult<T> {
    serde_json::from_str(body)
        .map_err(|err| RepoError::InvalidData(format!("invalid {collection} body: {err}")))
}

fn parse_stored_id(collection: &str, value: &str) -> RepoResult<RecordId> {
    Uuid::parse_str(value).map_err(|_| {
        RepoError::InvalidData(format!("invalid id value `{value}` in {collection}.id"))
    })
}

pub(crate) fn insert_record<T: StoredRecord>(conn: &Connection, record: &T) -> RepoResult<()> {
    let body = encode_body(T::COLLECTION, record)?;
    conn.execute(
        &format!(
            "INSERT INTO {} (id, business_id, body) VALUES (?1, ?2, ?3);",
            T::COLLECTION
        ),
        params![
            record.record_id().to_string(),
            record.tenant().as_str(),
            body
        ],
    )?;
    Ok(())
}

pub(crate) fn get_record<T: StoredRecord>(
    conn: &Connection,
    id: RecordId,
    tenant: &TenantId,
) -> RepoResult<Option<T>> {
    let body: Option<String> = conn
        .query_row(
            &format!(
                "SELECT body FROM {} WHERE id = ?1 AND business_id = ?2;",
                T::COLLECTION
            ),
            params![id.to_string(), tenant.as_str()],
            |row| row.get(0),
        )
        .optional()?;

    body.map(|text| decode_body(T::COLLECTION, &text)).transpose()
}

pub(crate) fn list_records<T: StoredRecord>(
    conn: &Connection,
    tenant: &TenantId,
    limit: u32,
) -> RepoResult<Vec<T>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT body FROM {}
         WHERE business_id = ?1
         ORDER BY created_at ASC, rowid ASC
         LIMIT ?2;",
        T::COLLECTION
    ))?;
    let mut rows = stmt.query(params![tenant.as_str(), i64::from(limit)])?;
    let mut records = Vec::new();
    while let Some(row) = rows.next()? {
        let body: String = row.get(0)?;
        records.push(decode_body(T::COLLECTION, &body)?);
    }
    Ok(records)
}

/// Applies `mutate` to the record matching `(id, tenant)` atomically.
///
/// `mutate` must leave identity and tenant untouched; it may reject the
/// change by returning an error, in which case nothing is written.
pub(crate) fn update_record<T, F>(
    conn: &Connection,
    id: RecordId,
    tenant: &TenantId,
    mutate: F,
) -> RepoResult<T>
where
    T: StoredRecord,
    F: FnOnce(&mut T) -> RepoResult<()>,
{
    let id_text = id.to_string();
    let tx = begin_immediate(conn)?;

    let body: Option<String> = tx
        .query_row(
            &format!(
                "SELECT body FROM {} WHERE id = ?1 AND business_id = ?2;",
                T::COLLECTION
            ),
            params![id_text.as_str(), tenant.as_str()],
            |row| row.get(0),
        )
        .optional()?;
    let Some(body) = body else {
        return Err(RepoError::NotFound(id));
    };

    let mut record: T = decode_body(T::COLLECTION, &body)?;
    mutate(&mut record)?;
    if record.record_id() != id || record.tenant() != tenant {
        return Err(RepoError::InvalidData(format!(
            "{} update must not change identity or tenant",
            T::COLLECTION
        )));
    }

    let changed = tx.execute(
        &format!(
            "UPDATE {}
             SET
                body = ?3,
                updated_at = (strftime('%s', 'now') * 1000)
             WHERE id = ?1
               AND business_id = ?2;",
            T::COLLECTION
        ),
        params![
            id_text.as_str(),
            tenant.as_str(),
            encode_body(T::COLLECTION, &record)?
        ],
    )?;
    if changed == 0 {
        return Err(RepoError::NotFound(id));
    }

    tx.commit()?;
    Ok(record)
}

pub(crate) fn delete_record<T: StoredRecord>(
    conn: &Connection,
    id: RecordId,
    tenant: &TenantId,
) -> RepoResult<()> {
    let changed = conn.execute(
        &format!(
            "DELETE FROM {} WHERE id = ?1 AND business_id = ?2;",
            T::COLLECTION
        ),
        params![id.to_string(), tenant.as_str()],
    )?;
    if changed == 0 {
        return Err(RepoError::NotFound(id));
    }
    Ok(())
}

/// Loads records whose id is in `ids`, across all tenants.
///
/// Result follows the first occurrence order of `ids`; ids without a stored
/// record are skipped and duplicates collapse to one entry.
pub(crate) fn find_records_by_ids<T: StoredRecord>(
    conn: &Connection,
    ids: &[RecordId],
) -> RepoResult<Vec<T>> {
    let mut wanted = Vec::new();
    let mut seen = HashSet::new();
    for id in ids {
        if seen.insert(*id) {
            wanted.push(*id);
        }
    }

    let mut found: HashMap<RecordId, T> = HashMap::with_capacity(wanted.len());
    for chunk in wanted.chunks(ID_LOOKUP_CHUNK) {
        let placeholders = vec!["?"; chunk.len()].join(", ");
        let mut stmt = conn.prepare(&format!(
            "SELECT id, body FROM {} WHERE id IN ({placeholders});",
            T::COLLECTION
        ))?;
        let bind_values = chunk
            .iter()
            .map(|id| Value::Text(id.to_string()))
            .collect::<Vec<_>>();
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        while let Some(row) = rows.next()? {
            let id_text: String = row.get(0)?;
            let body: String = row.get(1)?;
            found.insert(
                parse_stored_id(T::COLLECTION, &id_text)?,
                decode_body(T::COLLECTION, &body)?,
            );
        }
    }

    Ok(wanted
        .into_iter()
        .filter_map(|id| found.remove(&id))
        .collect())
}

/// Id-only projection over the whole collection, in creation order.
pub(crate) fn list_record_ids<T: StoredRecord>(conn: &Connection) -> RepoResult<Vec<RecordId>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT id FROM {} ORDER BY created_at ASC, rowid ASC;",
        T::COLLECTION
    ))?;
    let mut rows = stmt.query([])?;
    let mut ids = Vec::new();
    while let Some(row) = rows.next()? {
        let id_text: String = row.get(0)?;
        ids.push(parse_stored_id(T::COLLECTION, &id_text)?);
    }
    Ok(ids)
}
