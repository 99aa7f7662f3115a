//! Document store error types

use thiserror::Error;

pub type Result<T> = std::result::Result<T, DocStoreError>;

#[derive(Debug, Error)]
pub enum DocStoreError {
    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Query error: {0}")]
    Query(tokio_postgres::Error),

    #[error("Pool error: {0}")]
    Pool(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid document id: {0}")]
    InvalidId(String),

    #[error("Invalid collection name: {0}")]
    InvalidCollection(String),
}
