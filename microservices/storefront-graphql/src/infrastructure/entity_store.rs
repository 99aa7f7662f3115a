//! Entity stores - one typed view per collection

use async_graphql::ID;
use futures_util::future::try_join_all;
use std::marker::PhantomData;
use std::sync::Arc;
use storefront_core::Result;
use storefront_docstore::{Document, DocumentCollection, DocumentId, DocumentStore, Filter};
use tracing::{debug, info, instrument};

use super::credentials::hash_password;
use super::storage_error;
use crate::domain::{
    Entity, Order, OrderFields, OrderStatus, Product, ProductFields, User, UserFields,
};

pub type UserStore = EntityStore<User>;
pub type ProductStore = EntityStore<Product>;
pub type OrderStore = EntityStore<Order>;

/// Typed wrapper over a document collection
pub struct EntityStore<E> {
    collection: Arc<dyn DocumentCollection>,
    _entity: PhantomData<fn() -> E>,
}

impl<E> Clone for EntityStore<E> {
    fn clone(&self) -> Self {
        Self {
            collection: self.collection.clone(),
            _entity: PhantomData,
        }
    }
}

fn parse_id(id: &str) -> Result<DocumentId> {
    id.parse().map_err(storage_error)
}

impl<E: Entity> EntityStore<E> {
    pub async fn open(store: &dyn DocumentStore) -> Result<Self> {
        let collection = store.collection(E::COLLECTION).await.map_err(storage_error)?;
        Ok(Self {
            collection,
            _entity: PhantomData,
        })
    }

    fn decode(doc: &Document) -> Result<E> {
        let fields = doc.decode::<E::Fields>().map_err(storage_error)?;
        Ok(E::from_parts(ID::from(doc.id.to_string()), fields))
    }

    /// Get by id; an unknown id is `Ok(None)`
    #[instrument(skip(self), fields(collection = E::COLLECTION))]
    pub async fn get(&self, id: &str) -> Result<Option<E>> {
        let id = parse_id(id)?;
        let doc = self.collection.find_by_id(&id).await.map_err(storage_error)?;
        debug!(found = doc.is_some(), "Lookup by id");
        doc.as_ref().map(Self::decode).transpose()
    }

    pub async fn find(&self, filter: &Filter) -> Result<Vec<E>> {
        let docs = self.collection.find(filter).await.map_err(storage_error)?;
        docs.iter().map(Self::decode).collect()
    }

    /// Every record in the collection
    pub async fn list(&self) -> Result<Vec<E>> {
        self.find(&Filter::all()).await
    }

    pub async fn insert(&self, fields: E::Fields) -> Result<E> {
        let body = serde_json::to_value(&fields)
            .map_err(|e| storage_error(e.into()))?;
        let doc = self.collection.insert(body).await.map_err(storage_error)?;
        info!(collection = E::COLLECTION, id = %doc.id, "Created record");
        Self::decode(&doc)
    }

    /// Delete by id and return what was removed; an unknown id is `Ok(None)`
    #[instrument(skip(self), fields(collection = E::COLLECTION))]
    pub async fn delete(&self, id: &str) -> Result<Option<E>> {
        let id = parse_id(id)?;
        let doc = self.collection.delete_by_id(&id).await.map_err(storage_error)?;
        if doc.is_some() {
            info!(%id, "Deleted record");
        }
        doc.as_ref().map(Self::decode).transpose()
    }
}

impl EntityStore<User> {
    /// Create a user, storing only a hash of the password
    pub async fn register(&self, username: String, password: &str) -> Result<User> {
        let password = hash_password(password)?;
        self.insert(UserFields { username, password }).await
    }
}

impl EntityStore<Product> {
    pub async fn create(&self, name: String, price: f64) -> Result<Product> {
        self.insert(ProductFields { name, price }).await
    }

    /// Resolve a list of references, keeping order and duplicates.
    ///
    /// Each reference is its own lookup today; callers only depend on the
    /// positional result, so this can become one batched query.
    pub async fn get_many(&self, ids: &[String]) -> Result<Vec<Option<Product>>> {
        try_join_all(ids.iter().map(|id| self.get(id))).await
    }
}

impl EntityStore<Order> {
    /// Create an order. References are normalised to canonical ids but not
    /// checked for existence.
    pub async fn create(
        &self,
        status: OrderStatus,
        user_id: &str,
        product_ids: &[String],
    ) -> Result<Order> {
        let user_id = parse_id(user_id)?.to_string();
        let product_ids = product_ids
            .iter()
            .map(|id| parse_id(id).map(|id| id.to_string()))
            .collect::<Result<Vec<_>>>()?;

        self.insert(OrderFields {
            status,
            user_id,
            product_ids,
        })
        .await
    }

    /// Orders whose owning reference is `user_id`
    pub async fn list_for_user(&self, user_id: &str) -> Result<Vec<Order>> {
        let user_id = parse_id(user_id)?;
        self.find(&Filter::new().eq("userId", user_id.to_string()))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use storefront_core::StorefrontError;
    use storefront_docstore::MemoryStore;

    async fn stores() -> crate::infrastructure::Stores {
        crate::infrastructure::Stores::open(&MemoryStore::new())
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_get_unknown_id_is_none() {
        let stores = stores().await;
        let id = DocumentId::generate().to_string();
        assert!(stores.users.get(&id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_malformed_id_is_database_error() {
        let stores = stores().await;
        let err = stores.products.get("not-an-id").await.unwrap_err();
        assert!(matches!(err, StorefrontError::Database(_)));
    }

    #[tokio::test]
    async fn test_get_many_keeps_duplicates_and_gaps() {
        let stores = stores().await;
        let widget = stores.products.create("Widget".into(), 9.99).await.unwrap();
        let gadget = stores.products.create("Gadget".into(), 5.0).await.unwrap();
        let gone = DocumentId::generate().to_string();

        let ids = vec![
            widget.id.to_string(),
            widget.id.to_string(),
            gone,
            gadget.id.to_string(),
        ];
        let resolved = stores.products.get_many(&ids).await.unwrap();

        assert_eq!(resolved.len(), 4);
        assert_eq!(resolved[0].as_ref(), Some(&widget));
        assert_eq!(resolved[1].as_ref(), Some(&widget));
        assert_eq!(resolved[2], None);
        assert_eq!(resolved[3].as_ref(), Some(&gadget));
    }

    #[tokio::test]
    async fn test_order_references_are_canonicalised() {
        let stores = stores().await;
        let user_id = DocumentId::generate().to_string();

        let order = stores
            .orders
            .create(OrderStatus::default(), &user_id.to_uppercase(), &[])
            .await
            .unwrap();

        assert_eq!(order.user_id, user_id);
        assert_eq!(stores.orders.list_for_user(&user_id).await.unwrap(), vec![order]);
    }

    #[tokio::test]
    async fn test_order_with_malformed_reference_is_not_stored() {
        let stores = stores().await;
        let user_id = DocumentId::generate().to_string();

        let result = stores
            .orders
            .create(OrderStatus::Shipped, &user_id, &["bogus".to_string()])
            .await;

        assert!(result.is_err());
        assert!(stores.orders.list().await.unwrap().is_empty());
    }
}
