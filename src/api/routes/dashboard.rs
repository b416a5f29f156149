//! Dashboard Routes
//!
//! - GET / - Page shell with the `#dashboard` container
//! - GET /dashboard - Bare card markup

use axum::{extract::State, response::Html};
use std::sync::Arc;

use crate::api::state::AppState;
use crate::render::render_page;

/// GET /
///
/// The container is empty until the first refresh succeeds.
pub async fn page(State(state): State<Arc<AppState>>) -> Html<String> {
    let cards = state.dashboard().html().await;
    Html(render_page(&cards, &state.page))
}

/// GET /dashboard
pub async fn fragment(State(state): State<Arc<AppState>>) -> Html<String> {
    Html(state.dashboard().html().await)
}
