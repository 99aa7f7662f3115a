//! Collection and store contracts shared by every backend

use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;

use crate::{Document, DocumentId, Filter, Result};

/// A named set of JSON documents
#[async_trait]
pub trait DocumentCollection: Send + Sync {
    fn name(&self) -> &str;

    /// Fetch one document; a missing id is `Ok(None)`
    async fn find_by_id(&self, id: &DocumentId) -> Result<Option<Document>>;

    /// Every document matching `filter`, in insertion order
    async fn find(&self, filter: &Filter) -> Result<Vec<Document>>;

    /// Persist `body` under a freshly generated id
    async fn insert(&self, body: Value) -> Result<Document>;

    /// Remove and return a document in one step; a missing id is `Ok(None)`
    async fn delete_by_id(&self, id: &DocumentId) -> Result<Option<Document>>;
}

/// Handle to a document database
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Open a collection, creating it on first use
    async fn collection(&self, name: &str) -> Result<Arc<dyn DocumentCollection>>;

    async fn is_healthy(&self) -> bool;
}

/// Collection names end up in SQL text, so only plain identifiers are allowed
pub(crate) fn is_valid_collection_name(s: &str) -> bool {
    !s.is_empty()
        && s.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
        && s.chars().next().is_some_and(|c| !c.is_ascii_digit())
}
