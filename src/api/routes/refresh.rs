//! Refresh Routes
//!
//! - POST /api/v1/refresh - Run a refresh cycle now
//! - GET /api/v1/status - Refresh bookkeeping

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::api::dto::RefreshResponse;
use crate::api::state::AppState;
use crate::dashboard::RefreshStatus;

/// POST /api/v1/refresh
///
/// Runs outside the regular schedule. A failed cycle still answers 200; the
/// outcome says what happened.
pub async fn trigger_refresh(State(state): State<Arc<AppState>>) -> Json<RefreshResponse> {
    let outcome = state.refresher.refresh().await;
    tracing::info!(?outcome, "Manual refresh completed");

    Json(RefreshResponse {
        outcome,
        status: state.dashboard().status().await,
    })
}

/// GET /api/v1/status
pub async fn get_status(State(state): State<Arc<AppState>>) -> Json<RefreshStatus> {
    Json(state.dashboard().status().await)
}
