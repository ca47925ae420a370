//! Domain model for documents, contracts, settings and the aggregate view.
//!
//! # Responsibility
//! - Define the persisted record shapes and their wire field names.
//! - Define caller input shapes (drafts and partial patches).
//! - Keep all defaulting rules next to the types they apply to.
//!
//! # Invariants
//! - Every document/contract/settings record is scoped by a `TenantId`.
//! - Record identity is serialized as `_id` and read back from `_id` or `id`.
//! - Patches touch only fields present in the input.

use serde::{Deserialize, Deserializer};

pub mod aggregate;
pub mod contract;
pub mod document;
pub mod element;
pub mod ids;
pub mod settings;
pub mod validation;

/// Reads `null` as the type default instead of failing.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// Distinguishes an explicit `null` (`Some(None)`) from an absent key (`None`).
///
/// Must be paired with `#[serde(default)]` so absent keys stay `None`.
pub(crate) fn explicit_null<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
