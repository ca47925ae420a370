//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define use-case oriented data access contracts per collection.
//! - Isolate SQLite query details from service orchestration.
//!
//! # Invariants
//! - Repository writes run record validation before persistence.
//! - Tenant-scoped lookups filter on identity and tenant together, so a
//!   record under another tenant surfaces as `NotFound`.
//! - Singleton rows are created through atomic upserts only.

pub mod aggregate_repo;
pub(crate) mod collection;
pub mod contract_repo;
pub mod document_repo;
pub mod error;
pub mod settings_repo;
pub(crate) mod singleton;

pub use collection::StoredRecord;
pub use error::{RepoError, RepoResult};

/// Upper bound applied to every tenant listing.
pub const MAX_LIST_LIMIT: u32 = 1000;
