//! PostgreSQL document backend: one JSONB table per collection

use async_trait::async_trait;
use dashmap::DashMap;
use serde_json::Value;
use std::sync::Arc;
use tokio_postgres::Row;
use tracing::{debug, info, instrument};
use uuid::Uuid;

use crate::collection::is_valid_collection_name;
use crate::{
    DocStoreError, DocStorePool, Document, DocumentCollection, DocumentId, DocumentStore, Filter,
    PoolConfig, Result,
};

/// A collection stored as `(id UUID, seq BIGSERIAL, doc JSONB)` rows
pub struct PgCollection {
    name: String,
    pool: DocStorePool,
}

impl PgCollection {
    fn new(name: &str, pool: DocStorePool) -> Self {
        Self {
            name: name.to_string(),
            pool,
        }
    }

    async fn ensure_table(&self) -> Result<()> {
        let conn = self.pool.get().await?;
        let ddl = format!(
            "CREATE TABLE IF NOT EXISTS {name} (
                id UUID PRIMARY KEY,
                seq BIGSERIAL,
                doc JSONB NOT NULL
            );
            CREATE INDEX IF NOT EXISTS {name}_doc_idx ON {name} USING GIN (doc jsonb_path_ops);",
            name = self.name
        );
        conn.batch_execute(&ddl).await.map_err(DocStoreError::Query)
    }
}

fn row_to_document(row: &Row) -> Result<Document> {
    let id: Uuid = row.try_get("id").map_err(DocStoreError::Query)?;
    let body: Value = row.try_get("doc").map_err(DocStoreError::Query)?;
    Ok(Document::new(DocumentId::from(id), body))
}

#[async_trait]
impl DocumentCollection for PgCollection {
    fn name(&self) -> &str {
        &self.name
    }

    #[instrument(skip(self), fields(collection = %self.name))]
    async fn find_by_id(&self, id: &DocumentId) -> Result<Option<Document>> {
        let conn = self.pool.get().await?;
        let sql = format!("SELECT id, doc FROM {} WHERE id = $1", self.name);
        let uuid = id.into_uuid();

        let row = conn
            .query_opt(&sql, &[&uuid])
            .await
            .map_err(DocStoreError::Query)?;
        row.as_ref().map(row_to_document).transpose()
    }

    #[instrument(skip(self), fields(collection = %self.name))]
    async fn find(&self, filter: &Filter) -> Result<Vec<Document>> {
        let conn = self.pool.get().await?;
        let sql = format!(
            "SELECT id, doc FROM {} WHERE doc @> $1 ORDER BY seq",
            self.name
        );
        let containment = filter.to_json();

        let rows = conn
            .query(&sql, &[&containment])
            .await
            .map_err(DocStoreError::Query)?;
        debug!(count = rows.len(), "Fetched documents");
        rows.iter().map(row_to_document).collect()
    }

    #[instrument(skip(self, body), fields(collection = %self.name))]
    async fn insert(&self, body: Value) -> Result<Document> {
        let conn = self.pool.get().await?;
        let sql = format!("INSERT INTO {} (id, doc) VALUES ($1, $2)", self.name);
        let id = DocumentId::generate();
        let uuid = id.into_uuid();

        conn.execute(&sql, &[&uuid, &body])
            .await
            .map_err(DocStoreError::Query)?;
        Ok(Document::new(id, body))
    }

    #[instrument(skip(self), fields(collection = %self.name))]
    async fn delete_by_id(&self, id: &DocumentId) -> Result<Option<Document>> {
        let conn = self.pool.get().await?;
        let sql = format!("DELETE FROM {} WHERE id = $1 RETURNING id, doc", self.name);
        let uuid = id.into_uuid();

        let row = conn
            .query_opt(&sql, &[&uuid])
            .await
            .map_err(DocStoreError::Query)?;
        row.as_ref().map(row_to_document).transpose()
    }
}

/// PostgreSQL-backed document store
pub struct PgDocumentStore {
    pool: DocStorePool,
    collections: DashMap<String, Arc<PgCollection>>,
}

impl PgDocumentStore {
    pub fn new(config: &PoolConfig) -> Result<Self> {
        Ok(Self::with_pool(DocStorePool::new(config)?))
    }

    pub fn with_pool(pool: DocStorePool) -> Self {
        Self {
            pool,
            collections: DashMap::new(),
        }
    }
}

#[async_trait]
impl DocumentStore for PgDocumentStore {
    async fn collection(&self, name: &str) -> Result<Arc<dyn DocumentCollection>> {
        if !is_valid_collection_name(name) {
            return Err(DocStoreError::InvalidCollection(name.to_string()));
        }

        if let Some(existing) = self.collections.get(name) {
            let collection: Arc<dyn DocumentCollection> = existing.clone();
            return Ok(collection);
        }

        let collection = Arc::new(PgCollection::new(name, self.pool.clone()));
        collection.ensure_table().await?;
        info!(collection = name, "Collection ready");

        let collection: Arc<dyn DocumentCollection> = self
            .collections
            .entry(name.to_string())
            .or_insert(collection)
            .clone();
        Ok(collection)
    }

    async fn is_healthy(&self) -> bool {
        self.pool.is_healthy().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    async fn connect() -> Option<PgDocumentStore> {
        // These tests require a running PostgreSQL instance
        let url = std::env::var("DOCSTORE_URL").ok()?;
        let config = PoolConfig { url, max_size: 4 };
        PgDocumentStore::new(&config).ok()
    }

    #[tokio::test]
    async fn test_round_trip() {
        let Some(store) = connect().await else {
            return;
        };

        let products = store.collection("docstore_test_products").await.unwrap();
        let doc = products
            .insert(json!({ "name": "Widget", "price": 9.99 }))
            .await
            .unwrap();

        let found = products.find_by_id(&doc.id).await.unwrap().unwrap();
        assert_eq!(found.body, json!({ "name": "Widget", "price": 9.99 }));

        let removed = products.delete_by_id(&doc.id).await.unwrap();
        assert_eq!(removed.map(|d| d.id), Some(doc.id));
        assert!(products.delete_by_id(&doc.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_filter_containment() {
        let Some(store) = connect().await else {
            return;
        };

        let orders = store.collection("docstore_test_orders").await.unwrap();
        let owner = DocumentId::generate().to_string();
        let a = orders.insert(json!({ "userId": owner })).await.unwrap();
        orders
            .insert(json!({ "userId": DocumentId::generate().to_string() }))
            .await
            .unwrap();
        let b = orders.insert(json!({ "userId": owner })).await.unwrap();

        let owned: Vec<DocumentId> = orders
            .find(&Filter::new().eq("userId", owner))
            .await
            .unwrap()
            .into_iter()
            .map(|d| d.id)
            .collect();
        assert_eq!(owned, vec![a.id, b.id]);
    }
}
