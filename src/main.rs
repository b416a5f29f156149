//! Rankboard Server
//!
//! Run with: cargo run --bin rankboard [-- path/to/config.toml]
//!
//! Without an explicit path the config is looked up in the default locations,
//! then `RANKBOARD_*` environment variables are applied on top.

use anyhow::Context;
use rankboard::api::{serve, AppState};
use rankboard::config::{Config, LoggingConfig};
use rankboard::dashboard::{DashboardState, Refresher};
use rankboard::snapshot::build_source;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = match std::env::args().nth(1).map(PathBuf::from) {
        Some(path) => Config::load_with_env(&path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => Config::load_default(),
    };

    init_logging(&config.logging);

    tracing::info!("Rankboard v{}", env!("CARGO_PKG_VERSION"));

    let source = build_source(&config.source).context("configuring snapshot source")?;
    tracing::info!(source = %source.describe(), "Snapshot source configured");

    let refresher = Arc::new(Refresher::new(
        source,
        Arc::new(DashboardState::new()),
        config.refresh.interval(),
    ));
    let refresh_handle = Arc::clone(&refresher).start();

    let state = AppState::new(Arc::clone(&refresher), config.page_options());
    serve(state, &config.api).await.context("running HTTP server")?;

    tracing::info!("Stopping refresh loop...");
    refresher.stop();
    refresh_handle.abort();

    tracing::info!("Rankboard stopped");
    Ok(())
}

/// Initialize tracing from the logging section.
///
/// `RUST_LOG` wins over the configured level when set.
fn init_logging(logging: &LoggingConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!("rankboard={},tower_http={}", logging.level, logging.level).into()
    });

    let registry = tracing_subscriber::registry().with(filter);

    if logging.format == "json" {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}
