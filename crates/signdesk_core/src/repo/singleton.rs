//! Keyed singleton rows with atomic find-or-create semantics.
//!
//! # Invariants
//! - Creation is `INSERT ... ON CONFLICT DO NOTHING`; there is no separate
//!   existence check, so concurrent first access yields one row.
//! - Create, read, mutate and write share one IMMEDIATE transaction.

use crate::repo::collection::{begin_immediate, decode_body, encode_body};
use crate::repo::error::RepoResult;
use rusqlite::{params, Connection};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Table holding one JSON body per key.
#[derive(Debug, Clone, Copy)]
pub(crate) struct SingletonTable {
    pub table: &'static str,
    pub key_column: &'static str,
}

/// Outcome of a singleton upsert.
pub(crate) struct Upserted<T> {
    pub record: T,
    /// Whether this call inserted the row.
    pub created: bool,
}

/// Returns the row stored under `key`, inserting `init()` first when absent,
/// then applies `mutate` and persists the result when it reports a change.
pub(crate) fn upsert_singleton<T, I, M>(
    conn: &Connection,
    table: SingletonTable,
    key: &str,
    init: I,
    mutate: M,
) -> RepoResult<Upserted<T>>
where
    T: Serialize + DeserializeOwned,
    I: FnOnce() -> T,
    M: FnOnce(&mut T) -> RepoResult<bool>,
{
    let SingletonTable { table, key_column } = table;
    let tx = begin_immediate(conn)?;

    let created = tx.execute(
        &format!(
            "INSERT INTO {table} ({key_column}, body) VALUES (?1, ?2)
             ON CONFLICT({key_column}) DO NOTHING;"
        ),
        params![key, encode_body(table, &init())?],
    )? == 1;

    let body: String = tx.query_row(
        &format!("SELECT body FROM {table} WHERE {key_column} = ?1;"),
        [key],
        |row| row.get(0),
    )?;
    let mut record: T = decode_body(table, &body)?;

    if mutate(&mut record)? {
        tx.execute(
            &format!(
                "UPDATE {table}
                 SET
                    body = ?2,
                    updated_at = (strftime('%s', 'now') * 1000)
                 WHERE {key_column} = ?1;"
            ),
            params![key, encode_body(table, &record)?],
        )?;
    }

    tx.commit()?;
    Ok(Upserted { record, created })
}
