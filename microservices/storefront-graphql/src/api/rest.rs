//! Health and readiness handlers

use axum::{extract::State, http::StatusCode, Json};
use std::time::Instant;
use storefront_core::{DependencyStatus, HealthStatus, ReadinessStatus};
use storefront_docstore::DocumentStore;

use super::AppState;
use crate::SERVICE_ID;

pub(crate) fn health_status(start_time: Instant) -> HealthStatus {
    HealthStatus {
        healthy: true,
        service_id: SERVICE_ID.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: start_time.elapsed().as_secs(),
    }
}

pub(crate) async fn readiness(store: &dyn DocumentStore) -> ReadinessStatus {
    let probe_started = Instant::now();
    let available = store.is_healthy().await;
    let latency_ms = u64::try_from(probe_started.elapsed().as_millis()).ok();

    ReadinessStatus {
        ready: available,
        dependencies: vec![DependencyStatus {
            name: "docstore".to_string(),
            available,
            latency_ms,
        }],
    }
}

pub async fn health_check(State(state): State<AppState>) -> Json<HealthStatus> {
    Json(health_status(state.start_time))
}

pub async fn ready_check(State(state): State<AppState>) -> (StatusCode, Json<ReadinessStatus>) {
    let status = readiness(state.store.as_ref()).await;
    let code = if status.ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    (code, Json(status))
}
