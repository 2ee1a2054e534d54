//! Document Store Access
//!
//! The persistence engine is treated as an opaque document store reached
//! through the [`Collection`] trait. A collection holds one document type;
//! the two backends are [`postgres::PgCollection`] (JSONB rows, one table
//! per collection) and [`memory::MemoryCollection`] (used by the test
//! suite).
//!
//! Writes are atomic per document and uniqueness is enforced by the store
//! itself; callers distinguish a duplicate-key rejection from any other
//! backend fault through [`StoreError::Duplicate`].

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// A persistable document.
///
/// Documents serialize to the JSON stored in their collection. `UNIQUE_FIELDS`
/// names top-level JSON fields whose values must be unique across the whole
/// collection, soft-deleted documents included.
pub trait Document: Clone + Serialize + DeserializeOwned + Send + Sync + 'static {
    /// Collection (table) name this document type lives in.
    const COLLECTION: &'static str;

    /// Top-level JSON fields with a uniqueness constraint.
    const UNIQUE_FIELDS: &'static [&'static str] = &[];

    fn id(&self) -> Uuid;

    /// Soft-deleted documents are kept in storage but excluded from listing.
    fn soft_deleted(&self) -> bool;
}

/// Failures raised by a store backend.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("duplicate value for unique field '{field}'")]
    Duplicate { field: String },

    #[error("storage backend error: {0}")]
    Backend(#[from] sqlx::Error),

    #[error("stored document could not be decoded: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Data-access interface for one document collection.
///
/// `find_by_id` returns an explicit `None` for an absent document; only a
/// failed lookup is an error. `list_active` always excludes soft-deleted
/// documents.
#[async_trait]
pub trait Collection<T: Document>: Send + Sync {
    async fn insert(&self, doc: &T) -> Result<(), StoreError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<T>, StoreError>;

    /// Look a document up by the value of a top-level JSON field.
    async fn find_one(&self, field: &str, value: &str) -> Result<Option<T>, StoreError>;

    async fn list_active(&self) -> Result<Vec<T>, StoreError>;
}
