//! # Rankboard
//!
//! Live ranked-ladder dashboard. Polls a snapshot document produced by an
//! external tracker and renders one player card per account: rank, session
//! game count, LP balance, winrate and match history.
//!
//! ## Modules
//!
//! - [`snapshot`]: Snapshot document types and sources (HTTP, file)
//! - [`render`]: Session statistics and card markup
//! - [`dashboard`]: Dashboard state and the refresh loop
//! - [`recap`]: End-of-event summary
//! - [`api`]: HTTP server with Axum
//! - [`config`]: TOML configuration with environment overrides
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use rankboard::dashboard::{DashboardState, Refresher};
//! use rankboard::snapshot::FileSource;
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() {
//!     let refresher = Refresher::new(
//!         Arc::new(FileSource::new("./static/data.json")),
//!         Arc::new(DashboardState::new()),
//!         Duration::from_secs(60),
//!     );
//!
//!     let outcome = refresher.refresh().await;
//!     println!("{:?}", outcome);
//!     println!("{}", refresher.state().html().await);
//! }
//! ```

pub mod api;
pub mod config;
pub mod dashboard;
pub mod recap;
pub mod render;
pub mod snapshot;

// Re-export top-level types for convenience
pub use snapshot::{
    build_source, Account, FileSource, HttpSource, LpChange, Match, RankInfo, Snapshot,
    SnapshotError, SnapshotResult, SnapshotSource, Tier,
};

pub use render::{render_card, render_dashboard, render_page, PageOptions, SessionStats};

pub use dashboard::{DashboardState, RefreshOutcome, RefreshStatus, Refresher, RenderedDashboard};

pub use recap::Recap;

pub use api::{build_router, serve, ApiError, AppState};

pub use config::{
    ApiConfig, Config, ConfigError, LoggingConfig, RefreshConfig, SourceConfig, ThemeConfig,
};
