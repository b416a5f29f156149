//! Health Routes
//!
//! Health check endpoints for monitoring and Kubernetes probes.
//!
//! - GET /health/live - Liveness probe (process is alive)
//! - GET /health/ready - Readiness probe (a dashboard has been rendered)
//! - GET /health - Full health status

use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;

use crate::api::dto::HealthResponse;
use crate::api::state::AppState;

/// GET /health/live
///
/// Returns 200 if the process is alive, no dependency checks.
pub async fn liveness() -> StatusCode {
    StatusCode::OK
}

/// GET /health/ready
///
/// Returns 200 once at least one refresh has been applied.
pub async fn readiness(State(state): State<Arc<AppState>>) -> StatusCode {
    if state.dashboard().is_ready().await {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    }
}

/// GET /health
///
/// Full health status. A dashboard whose newest refresh failed is degraded:
/// it is still served, but the data may be stale.
pub async fn full_health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let ready = state.dashboard().is_ready().await;
    let status = state.dashboard().status().await;

    let overall_status = match (ready, status.last_error.is_some()) {
        (false, _) => "starting",
        (true, false) => "healthy",
        (true, true) => "degraded",
    };

    Json(HealthResponse {
        status: overall_status.to_string(),
        dashboard: if ready { "ready" } else { "waiting" }.to_string(),
        last_success: status.last_success,
        last_error: status.last_error,
        uptime_seconds: state.uptime_seconds(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
