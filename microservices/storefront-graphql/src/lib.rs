//! Storefront GraphQL Service
//!
//! GraphQL API over a document store exposing users, products and orders:
//! - Queries for single records by id and for whole collections
//! - Add/delete mutations, with deleteUser cascading to the user's orders
//! - Order.user and Order.products resolved lazily from stored references
//! - GraphiQL explorer, health and readiness probes

pub mod api;
pub mod config;
pub mod domain;
pub mod handlers;
pub mod infrastructure;
pub mod service;

pub use api::{build_schema, create_router, AppState, StorefrontSchema};
pub use config::{GraphqlConfig, StorageBackend};
pub use domain::{Order, OrderStatus, Product, User};
pub use infrastructure::Stores;
pub use service::StorefrontGraphqlService;

pub const SERVICE_ID: &str = "storefront-graphql";
