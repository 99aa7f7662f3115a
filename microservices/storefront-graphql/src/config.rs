//! Storefront GraphQL Configuration

use axum::http::HeaderValue;
use std::str::FromStr;
use storefront_core::config::{env_or, env_parse};
use storefront_core::{Result, ServiceConfig, StorefrontError};
use storefront_docstore::PoolConfig;

/// Which document store backs the API
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    Postgres,
    Memory,
}

impl FromStr for StorageBackend {
    type Err = StorefrontError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(Self::Postgres),
            "memory" => Ok(Self::Memory),
            other => Err(StorefrontError::Config(format!(
                "Unknown STORAGE_BACKEND '{}', expected 'postgres' or 'memory'",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone)]
pub struct GraphqlConfig {
    pub service: ServiceConfig,
    pub storage: StorageBackend,
    pub docstore: PoolConfig,
    pub cors_origin: String,
    pub enable_graphiql: bool,
}

impl GraphqlConfig {
    pub fn from_env() -> Result<Self> {
        let config = Self {
            service: ServiceConfig::from_env()?,
            storage: env_or("STORAGE_BACKEND", "postgres").parse()?,
            docstore: PoolConfig::from_env()
                .map_err(|e| StorefrontError::Config(e.to_string()))?,
            cors_origin: env_or("CORS_ORIGIN", "*"),
            enable_graphiql: env_parse("ENABLE_GRAPHIQL", true)?,
        };
        config.validate()?;
        Ok(config)
    }

    /// Self-contained configuration backed by the in-process store
    pub fn in_memory() -> Self {
        Self {
            service: ServiceConfig::default(),
            storage: StorageBackend::Memory,
            docstore: PoolConfig::default(),
            cors_origin: "*".to_string(),
            enable_graphiql: true,
        }
    }

    pub fn validate(&self) -> Result<()> {
        HeaderValue::from_str(&self.cors_origin)
            .map_err(|e| StorefrontError::Config(format!("Invalid CORS_ORIGIN: {}", e)))?;
        if self.docstore.max_size == 0 {
            return Err(StorefrontError::Config(
                "DOCSTORE_POOL_SIZE must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_backend_parse() {
        assert_eq!("postgres".parse::<StorageBackend>().unwrap(), StorageBackend::Postgres);
        assert_eq!(" Memory ".parse::<StorageBackend>().unwrap(), StorageBackend::Memory);
        assert!(matches!(
            "mongo".parse::<StorageBackend>(),
            Err(StorefrontError::Config(_))
        ));
    }

    #[test]
    fn test_in_memory_config_is_valid() {
        let config = GraphqlConfig::in_memory();
        assert!(config.validate().is_ok());
        assert_eq!(config.storage, StorageBackend::Memory);
    }

    #[test]
    fn test_rejects_bad_cors_origin() {
        let mut config = GraphqlConfig::in_memory();
        config.cors_origin = "https://shop.example\n".to_string();
        assert!(config.validate().is_err());
    }
}
