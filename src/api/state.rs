//! Application State
//!
//! Shared state accessible by all API handlers.
//! Wrapped in Arc for thread-safe sharing across async tasks.

use std::sync::Arc;
use std::time::Instant;

use crate::dashboard::{DashboardState, Refresher};
use crate::render::PageOptions;

/// Shared application state for all handlers
#[derive(Clone)]
pub struct AppState {
    /// Refresh loop driving the dashboard
    pub refresher: Arc<Refresher>,
    /// Page shell settings
    pub page: Arc<PageOptions>,
    /// Server start time for uptime tracking
    pub start_time: Instant,
}

impl AppState {
    pub fn new(refresher: Arc<Refresher>, page: PageOptions) -> Self {
        Self {
            refresher,
            page: Arc::new(page),
            start_time: Instant::now(),
        }
    }

    /// The dashboard container
    pub fn dashboard(&self) -> &Arc<DashboardState> {
        self.refresher.state()
    }

    /// Get server uptime in seconds
    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}
