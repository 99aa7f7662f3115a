//! In-process document store

use async_trait::async_trait;
use dashmap::DashMap;
use serde_json::Value;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::debug;

use crate::collection::is_valid_collection_name;
use crate::{DocStoreError, Document, DocumentCollection, DocumentId, DocumentStore, Filter, Result};

/// DashMap-backed collection. Entries carry an insertion sequence so
/// listings come back in the order documents were added.
pub struct MemoryCollection {
    name: String,
    docs: DashMap<DocumentId, (u64, Value)>,
    next_seq: AtomicU64,
}

impl MemoryCollection {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            docs: DashMap::new(),
            next_seq: AtomicU64::new(0),
        }
    }

    pub fn len(&self) -> usize {
        self.docs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }
}

#[async_trait]
impl DocumentCollection for MemoryCollection {
    fn name(&self) -> &str {
        &self.name
    }

    async fn find_by_id(&self, id: &DocumentId) -> Result<Option<Document>> {
        Ok(self
            .docs
            .get(id)
            .map(|entry| Document::new(*id, entry.value().1.clone())))
    }

    async fn find(&self, filter: &Filter) -> Result<Vec<Document>> {
        let mut matches: Vec<(u64, Document)> = self
            .docs
            .iter()
            .filter(|entry| filter.matches(&entry.value().1))
            .map(|entry| {
                let (seq, body) = entry.value();
                (*seq, Document::new(*entry.key(), body.clone()))
            })
            .collect();
        matches.sort_by_key(|(seq, _)| *seq);

        Ok(matches.into_iter().map(|(_, doc)| doc).collect())
    }

    async fn insert(&self, body: Value) -> Result<Document> {
        let id = DocumentId::generate();
        let seq = self.next_seq.fetch_add(1, Ordering::SeqCst);
        self.docs.insert(id, (seq, body.clone()));
        debug!(collection = %self.name, %id, "Inserted document");
        Ok(Document::new(id, body))
    }

    async fn delete_by_id(&self, id: &DocumentId) -> Result<Option<Document>> {
        Ok(self
            .docs
            .remove(id)
            .map(|(id, (_, body))| Document::new(id, body)))
    }
}

/// In-process store holding one [`MemoryCollection`] per name
#[derive(Default)]
pub struct MemoryStore {
    collections: DashMap<String, Arc<MemoryCollection>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn collection(&self, name: &str) -> Result<Arc<dyn DocumentCollection>> {
        if !is_valid_collection_name(name) {
            return Err(DocStoreError::InvalidCollection(name.to_string()));
        }

        let collection: Arc<dyn DocumentCollection> = self
            .collections
            .entry(name.to_string())
            .or_insert_with(|| Arc::new(MemoryCollection::new(name)))
            .clone();
        Ok(collection)
    }

    async fn is_healthy(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_insert_and_find_by_id() {
        let collection = MemoryCollection::new("products");
        let doc = collection
            .insert(json!({ "name": "Widget", "price": 9.99 }))
            .await
            .unwrap();

        let found = collection.find_by_id(&doc.id).await.unwrap().unwrap();
        assert_eq!(found, doc);
        assert_eq!(found.body["price"], json!(9.99));
    }

    #[tokio::test]
    async fn test_find_preserves_insertion_order() {
        let collection = MemoryCollection::new("orders");
        let mut inserted = Vec::new();
        for n in 0..20 {
            inserted.push(collection.insert(json!({ "n": n })).await.unwrap().id);
        }

        let listed: Vec<DocumentId> = collection
            .find(&Filter::all())
            .await
            .unwrap()
            .into_iter()
            .map(|doc| doc.id)
            .collect();
        assert_eq!(listed, inserted);
    }

    #[tokio::test]
    async fn test_find_with_filter() {
        let collection = MemoryCollection::new("orders");
        collection.insert(json!({ "userId": "a" })).await.unwrap();
        collection.insert(json!({ "userId": "b" })).await.unwrap();
        collection.insert(json!({ "userId": "a" })).await.unwrap();

        let owned = collection
            .find(&Filter::new().eq("userId", "a"))
            .await
            .unwrap();
        assert_eq!(owned.len(), 2);
    }

    #[tokio::test]
    async fn test_delete_returns_document_once() {
        let collection = MemoryCollection::new("users");
        let doc = collection.insert(json!({ "username": "ada" })).await.unwrap();

        let first = collection.delete_by_id(&doc.id).await.unwrap();
        let second = collection.delete_by_id(&doc.id).await.unwrap();

        assert_eq!(first, Some(doc));
        assert_eq!(second, None);
        assert!(collection.is_empty());
    }

    #[tokio::test]
    async fn test_missing_id_is_none() {
        let collection = MemoryCollection::new("users");
        let missing = DocumentId::generate();
        assert!(collection.find_by_id(&missing).await.unwrap().is_none());
        assert!(collection.delete_by_id(&missing).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_store_returns_same_collection() {
        let store = MemoryStore::new();
        let users = store.collection("users").await.unwrap();
        users.insert(json!({ "username": "ada" })).await.unwrap();

        let again = store.collection("users").await.unwrap();
        assert_eq!(again.find(&Filter::all()).await.unwrap().len(), 1);
        assert!(matches!(
            store.collection("bad name").await,
            Err(DocStoreError::InvalidCollection(_))
        ));
    }
}
