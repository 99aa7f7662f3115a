//! API module - GraphQL endpoint, explorer and probes

pub mod cors;
mod error;
pub mod graphql;
pub mod rest;

use async_graphql::http::GraphiQLSource;
use async_graphql_axum::{GraphQLRequest, GraphQLResponse};
use axum::{
    extract::{FromRequest, Query, Request, State},
    middleware,
    response::{Html, IntoResponse, Response},
    routing::get,
    Router,
};
use serde::Deserialize;
use std::sync::Arc;
use std::time::Instant;
use storefront_docstore::DocumentStore;

use crate::config::GraphqlConfig;
pub use graphql::{build_schema, MutationRoot, QueryRoot, StorefrontSchema};

pub const GRAPHQL_PATH: &str = "/graphql";

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub config: GraphqlConfig,
    pub schema: StorefrontSchema,
    pub store: Arc<dyn DocumentStore>,
    pub start_time: Instant,
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health endpoints
        .route("/health", get(rest::health_check))
        .route("/ready", get(rest::ready_check))
        // GraphQL endpoint
        .route(GRAPHQL_PATH, get(graphql_get).post(graphql_handler))
        .layer(middleware::from_fn_with_state(state.clone(), cors::cors))
        .with_state(state)
}

async fn graphql_handler(State(state): State<AppState>, req: GraphQLRequest) -> GraphQLResponse {
    state.schema.execute(req.into_inner()).await.into()
}

#[derive(Debug, Deserialize)]
struct GetParams {
    query: Option<String>,
}

/// GET runs `?query=` documents; a bare GET opens the explorer when enabled.
async fn graphql_get(
    State(state): State<AppState>,
    Query(params): Query<GetParams>,
    request: Request,
) -> Response {
    if params.query.is_none() && state.config.enable_graphiql {
        return graphiql().await.into_response();
    }

    match <GraphQLRequest as FromRequest<AppState>>::from_request(request, &state).await {
        Ok(req) => graphql_handler(State(state), req).await.into_response(),
        Err(rejection) => rejection.into_response(),
    }
}

async fn graphiql() -> impl IntoResponse {
    Html(GraphiQLSource::build().endpoint(GRAPHQL_PATH).finish())
}
