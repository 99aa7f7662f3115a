//! Infrastructure module - typed access to the document store

pub mod credentials;
pub mod entity_store;

pub use entity_store::{EntityStore, OrderStore, ProductStore, UserStore};

use storefront_core::{Result, StorefrontError};
use storefront_docstore::{DocStoreError, DocumentStore};

use crate::domain::{Order, Product, User};

/// Every storage failure, malformed ids included, surfaces as a database error
pub(crate) fn storage_error(err: DocStoreError) -> StorefrontError {
    StorefrontError::Database(err.to_string())
}

/// The storage handle injected into the resolver layer
#[derive(Clone)]
pub struct Stores {
    pub users: UserStore,
    pub products: ProductStore,
    pub orders: OrderStore,
}

impl Stores {
    pub async fn open(store: &dyn DocumentStore) -> Result<Self> {
        Ok(Self {
            users: EntityStore::<User>::open(store).await?,
            products: EntityStore::<Product>::open(store).await?,
            orders: EntityStore::<Order>::open(store).await?,
        })
    }
}
