//! Storefront Document Store
//!
//! Schemaless JSON collections with lookup-by-id, lookup-by-filter,
//! insert and delete. Two backends share the [`DocumentStore`] contract:
//! PostgreSQL JSONB tables behind a connection pool, and an in-process
//! store for local runs and tests.

mod collection;
mod error;
mod memory;
mod pool;
mod postgres;
mod types;

pub use collection::{DocumentCollection, DocumentStore};
pub use error::{DocStoreError, Result};
pub use memory::{MemoryCollection, MemoryStore};
pub use pool::{DocStorePool, PoolConfig};
pub use postgres::{PgCollection, PgDocumentStore};
pub use types::{Document, DocumentId, Filter};
