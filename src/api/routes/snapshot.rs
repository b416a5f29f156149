//! Snapshot Routes
//!
//! - GET /api/v1/snapshot - Snapshot behind the dashboard on display
//! - GET /api/v1/recap - Event recap of that snapshot

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::api::dto::SnapshotResponse;
use crate::api::error::{ApiError, ApiResult};
use crate::api::state::AppState;
use crate::dashboard::RenderedDashboard;
use crate::recap::Recap;

async fn applied(state: &AppState) -> ApiResult<Arc<RenderedDashboard>> {
    state
        .dashboard()
        .current()
        .await
        .ok_or_else(|| ApiError::NotFound("no snapshot has been loaded yet".to_string()))
}

/// GET /api/v1/snapshot
pub async fn get_snapshot(State(state): State<Arc<AppState>>) -> ApiResult<Json<SnapshotResponse>> {
    let rendered = applied(&state).await?;

    Ok(Json(SnapshotResponse {
        ticket: rendered.ticket,
        rendered_at: rendered.rendered_at,
        snapshot: rendered.snapshot.clone(),
    }))
}

/// GET /api/v1/recap
pub async fn get_recap(State(state): State<Arc<AppState>>) -> ApiResult<Json<Recap>> {
    let rendered = applied(&state).await?;
    Ok(Json(Recap::compute(&rendered.snapshot)))
}
