//! Dashboard Renderer
//!
//! Ties a snapshot source to the dashboard container:
//! - [`DashboardState`]: the last applied render plus refresh bookkeeping
//! - [`Refresher`]: fetch, render and apply on a fixed interval

mod refresher;
mod state;

pub use refresher::{RefreshOutcome, Refresher};
pub use state::{DashboardState, RefreshStatus, RenderedDashboard};
