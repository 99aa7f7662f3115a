use std::sync::Arc;
use storefront_core::{MicroserviceRuntime, Result, StorefrontError};
use storefront_graphql::{GraphqlConfig, StorefrontGraphqlService, SERVICE_ID};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    storefront_telemetry::init(SERVICE_ID).map_err(|e| StorefrontError::Config(e.to_string()))?;

    info!("Starting Storefront GraphQL microservice");

    let config = GraphqlConfig::from_env()?;
    let service = Arc::new(StorefrontGraphqlService::new(config).await?);
    MicroserviceRuntime::run(service).await
}
