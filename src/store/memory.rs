/**
 * In-Memory Collection Backend
 *
 * Keeps documents in a shared map behind an async RwLock. Enforces the same
 * contract as the Postgres backend, including uniqueness across soft-deleted
 * documents, which makes it a drop-in store for the test suite.
 */

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::store::{Collection, Document, StoreError};

/// A [`Collection`] held entirely in process memory.
#[derive(Clone, Default)]
pub struct MemoryCollection<T> {
    docs: Arc<RwLock<HashMap<Uuid, T>>>,
}

impl<T: Document> MemoryCollection<T> {
    pub fn new() -> Self {
        Self {
            docs: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    pub async fn len(&self) -> usize {
        self.docs.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.docs.read().await.is_empty()
    }
}

/// Top-level field value of a document's JSON representation.
fn field_value<T: Document>(doc: &T, field: &str) -> Result<Option<String>, StoreError> {
    let json = serde_json::to_value(doc)?;
    Ok(json
        .get(field)
        .and_then(|v| v.as_str())
        .map(str::to_string))
}

#[async_trait]
impl<T: Document> Collection<T> for MemoryCollection<T> {
    async fn insert(&self, doc: &T) -> Result<(), StoreError> {
        let mut docs = self.docs.write().await;
        for field in T::UNIQUE_FIELDS {
            let candidate = field_value(doc, field)?;
            for existing in docs.values() {
                if candidate.is_some() && field_value(existing, field)? == candidate {
                    return Err(StoreError::Duplicate {
                        field: (*field).to_string(),
                    });
                }
            }
        }
        docs.insert(doc.id(), doc.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<T>, StoreError> {
        Ok(self.docs.read().await.get(&id).cloned())
    }

    async fn find_one(&self, field: &str, value: &str) -> Result<Option<T>, StoreError> {
        let docs = self.docs.read().await;
        for doc in docs.values() {
            if field_value(doc, field)?.as_deref() == Some(value) {
                return Ok(Some(doc.clone()));
            }
        }
        Ok(None)
    }

    async fn list_active(&self) -> Result<Vec<T>, StoreError> {
        let docs = self.docs.read().await;
        Ok(docs
            .values()
            .filter(|doc| !doc.soft_deleted())
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Note {
        id: Uuid,
        label: String,
        #[serde(rename = "softDelete")]
        soft_delete: bool,
    }

    impl Document for Note {
        const COLLECTION: &'static str = "notes";
        const UNIQUE_FIELDS: &'static [&'static str] = &["label"];

        fn id(&self) -> Uuid {
            self.id
        }

        fn soft_deleted(&self) -> bool {
            self.soft_delete
        }
    }

    fn note(label: &str, soft_delete: bool) -> Note {
        Note {
            id: Uuid::new_v4(),
            label: label.to_string(),
            soft_delete,
        }
    }

    #[tokio::test]
    async fn test_insert_and_find_by_id() {
        let collection = MemoryCollection::new();
        let doc = note("first", false);
        collection.insert(&doc).await.unwrap();

        let found = collection.find_by_id(doc.id).await.unwrap();
        assert_eq!(found, Some(doc));
    }

    #[tokio::test]
    async fn test_find_by_id_absent_is_none_not_error() {
        let collection: MemoryCollection<Note> = MemoryCollection::new();
        let found = collection.find_by_id(Uuid::new_v4()).await.unwrap();
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn test_duplicate_unique_field_is_rejected() {
        let collection = MemoryCollection::new();
        collection.insert(&note("taken", false)).await.unwrap();

        let err = collection.insert(&note("taken", false)).await.unwrap_err();
        match err {
            StoreError::Duplicate { field } => assert_eq!(field, "label"),
            other => panic!("expected Duplicate, got {other:?}"),
        }
        assert_eq!(collection.len().await, 1);
    }

    #[tokio::test]
    async fn test_uniqueness_spans_soft_deleted_documents() {
        let collection = MemoryCollection::new();
        collection.insert(&note("gone", true)).await.unwrap();

        let err = collection.insert(&note("gone", false)).await;
        assert!(matches!(err, Err(StoreError::Duplicate { .. })));
    }

    #[tokio::test]
    async fn test_list_active_excludes_soft_deleted() {
        let collection = MemoryCollection::new();
        let kept = note("kept", false);
        let hidden = note("hidden", true);
        collection.insert(&kept).await.unwrap();
        collection.insert(&hidden).await.unwrap();

        let active = collection.list_active().await.unwrap();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].label, "kept");

        // Direct lookup still reaches the soft-deleted document.
        assert!(collection.find_by_id(hidden.id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_find_one_matches_field_value() {
        let collection = MemoryCollection::new();
        let doc = note("needle", false);
        collection.insert(&doc).await.unwrap();

        let found = collection.find_one("label", "needle").await.unwrap();
        assert_eq!(found, Some(doc));
        assert!(collection
            .find_one("label", "missing")
            .await
            .unwrap()
            .is_none());
    }
}
