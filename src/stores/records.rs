use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use parking_lot::RwLock;
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("record store error: {0}")]
    Backend(String),

    #[error("malformed document in `{collection}`: {source}")]
    Document {
        collection: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Equality predicate on a single document field.
pub type Filter<'a> = (&'a str, Value);

/// Opaque document persistence: flat collections of JSON documents addressed
/// by id. Queries support equality filters only; result order is whatever
/// the store yields and callers must not depend on it.
#[async_trait]
pub trait RecordStore: Send + Sync {
    async fn put(&self, collection: &str, id: &str, document: Value) -> Result<(), StoreError>;

    async fn get(&self, collection: &str, id: &str) -> Result<Option<Value>, StoreError>;

    async fn query(
        &self,
        collection: &str,
        filters: &[Filter<'_>],
    ) -> Result<Vec<Value>, StoreError>;

    /// Removes a document. Deleting an absent id is not an error.
    async fn delete(&self, collection: &str, id: &str) -> Result<(), StoreError>;
}

/// In-memory adapter used by the server binary and the tests.
#[derive(Default)]
pub struct MemoryRecordStore {
    collections: RwLock<HashMap<String, BTreeMap<String, Value>>>,
}

#[async_trait]
impl RecordStore for MemoryRecordStore {
    async fn put(&self, collection: &str, id: &str, document: Value) -> Result<(), StoreError> {
        let mut collections = self.collections.write();
        collections
            .entry(collection.to_string())
            .or_default()
            .insert(id.to_string(), document);
        Ok(())
    }

    async fn get(&self, collection: &str, id: &str) -> Result<Option<Value>, StoreError> {
        let collections = self.collections.read();
        Ok(collections
            .get(collection)
            .and_then(|documents| documents.get(id))
            .cloned())
    }

    async fn query(
        &self,
        collection: &str,
        filters: &[Filter<'_>],
    ) -> Result<Vec<Value>, StoreError> {
        let collections = self.collections.read();
        let documents = match collections.get(collection) {
            Some(documents) => documents,
            None => return Ok(Vec::new()),
        };
        Ok(documents
            .values()
            .filter(|document| {
                filters
                    .iter()
                    .all(|(field, value)| document.get(*field) == Some(value))
            })
            .cloned()
            .collect())
    }

    async fn delete(&self, collection: &str, id: &str) -> Result<(), StoreError> {
        let mut collections = self.collections.write();
        if let Some(documents) = collections.get_mut(collection) {
            documents.remove(id);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[tokio::test]
    async fn query_filters_are_anded() {
        let store = MemoryRecordStore::default();
        store
            .put("users", "a", json!({"role": "student", "isApproved": false}))
            .await
            .unwrap();
        store
            .put("users", "b", json!({"role": "student", "isApproved": true}))
            .await
            .unwrap();
        store
            .put("users", "c", json!({"role": "teacher"}))
            .await
            .unwrap();

        let pending = store
            .query(
                "users",
                &[("role", json!("student")), ("isApproved", json!(false))],
            )
            .await
            .unwrap();
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0]["isApproved"], json!(false));
    }

    #[tokio::test]
    async fn query_on_missing_collection_is_empty() {
        let store = MemoryRecordStore::default();
        let documents = store.query("appointments", &[]).await.unwrap();
        assert!(documents.is_empty());
    }

    #[tokio::test]
    async fn delete_is_idempotent() {
        let store = MemoryRecordStore::default();
        store.put("users", "a", json!({"name": "x"})).await.unwrap();
        store.delete("users", "a").await.unwrap();
        store.delete("users", "a").await.unwrap();
        assert!(store.get("users", "a").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn put_overwrites_existing_document() {
        let store = MemoryRecordStore::default();
        store.put("users", "a", json!({"name": "x"})).await.unwrap();
        store.put("users", "a", json!({"name": "y"})).await.unwrap();
        let document = store.get("users", "a").await.unwrap().unwrap();
        assert_eq!(document["name"], json!("y"));
    }
}
