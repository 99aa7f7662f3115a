//! Service lifecycle: storage bootstrap, schema construction, HTTP serving

use axum::Router;
use std::sync::Arc;
use std::time::Instant;
use storefront_core::{HealthStatus, ReadinessStatus, Result, StorefrontError, StorefrontService};
use storefront_docstore::{DocumentStore, MemoryStore, PgDocumentStore};
use tracing::{info, warn};

use crate::api::{self, build_schema, AppState, StorefrontSchema};
use crate::config::{GraphqlConfig, StorageBackend};
use crate::infrastructure::{storage_error, Stores};
use crate::SERVICE_ID;

pub struct StorefrontGraphqlService {
    config: GraphqlConfig,
    store: Arc<dyn DocumentStore>,
    schema: StorefrontSchema,
    start_time: Instant,
}

impl StorefrontGraphqlService {
    pub async fn new(config: GraphqlConfig) -> Result<Self> {
        let store = open_store(&config)?;
        Self::with_store(config, store).await
    }

    /// Build the service over an already-open document store
    pub async fn with_store(config: GraphqlConfig, store: Arc<dyn DocumentStore>) -> Result<Self> {
        let stores = Stores::open(store.as_ref()).await?;
        let schema = build_schema(stores);

        Ok(Self {
            config,
            store,
            schema,
            start_time: Instant::now(),
        })
    }

    pub fn schema(&self) -> &StorefrontSchema {
        &self.schema
    }

    pub fn router(&self) -> Router {
        api::create_router(AppState {
            config: self.config.clone(),
            schema: self.schema.clone(),
            store: self.store.clone(),
            start_time: self.start_time,
        })
    }
}

fn open_store(config: &GraphqlConfig) -> Result<Arc<dyn DocumentStore>> {
    match config.storage {
        StorageBackend::Postgres => {
            let store = PgDocumentStore::new(&config.docstore).map_err(storage_error)?;
            Ok(Arc::new(store))
        }
        StorageBackend::Memory => {
            warn!("Using the in-memory document store; data is lost on restart");
            Ok(Arc::new(MemoryStore::new()))
        }
    }
}

#[async_trait::async_trait]
impl StorefrontService for StorefrontGraphqlService {
    fn service_id(&self) -> &'static str {
        SERVICE_ID
    }

    async fn health(&self) -> HealthStatus {
        api::rest::health_status(self.start_time)
    }

    async fn ready(&self) -> ReadinessStatus {
        api::rest::readiness(self.store.as_ref()).await
    }

    async fn shutdown(&self) -> Result<()> {
        info!("Shutting down Storefront GraphQL service");
        Ok(())
    }

    async fn start(&self) -> Result<()> {
        info!(
            http = %self.config.service.http_bind,
            graphiql = self.config.enable_graphiql,
            "Starting Storefront GraphQL server"
        );

        let listener = tokio::net::TcpListener::bind(&self.config.service.http_bind).await?;
        axum::serve(listener, self.router())
            .await
            .map_err(|e| StorefrontError::Network(e.to_string()))?;

        Ok(())
    }
}
