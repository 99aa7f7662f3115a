//! Domain module - the entities exposed through the API

pub mod order;
pub mod product;
pub mod user;

pub use order::{Order, OrderFields, OrderStatus};
pub use product::{Product, ProductFields};
pub use user::{User, UserFields};

use async_graphql::ID;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// A record type persisted in its own collection.
///
/// `Fields` is the stored document body; the identifier lives beside it.
pub trait Entity: Sized + Send + Sync + 'static {
    const COLLECTION: &'static str;

    type Fields: Serialize + DeserializeOwned + Send;

    fn from_parts(id: ID, fields: Self::Fields) -> Self;
}
