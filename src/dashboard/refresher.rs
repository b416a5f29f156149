//! Dashboard Refresher
//!
//! Polls the snapshot source and applies fresh renders to the dashboard state.
//! One refresh runs at startup and one more on every interval tick, whatever
//! happened to the previous one.

use serde::Serialize;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use super::state::{DashboardState, RenderedDashboard};
use crate::snapshot::SnapshotSource;

/// Result of a single refresh cycle
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum RefreshOutcome {
    /// New render is on display
    Applied { ticket: u64, accounts: usize },
    /// Fetched fine, but a newer cycle had already applied its render
    Superseded { ticket: u64 },
    /// Fetch or parse failed; the previous render stays on display
    Failed { ticket: u64, error: String },
}

/// Periodically re-renders the dashboard from a snapshot source
pub struct Refresher {
    source: Arc<dyn SnapshotSource>,
    state: Arc<DashboardState>,
    interval: Duration,
    running: AtomicBool,
}

impl Refresher {
    /// Create a refresher. Intervals below one second are raised to one second.
    pub fn new(
        source: Arc<dyn SnapshotSource>,
        state: Arc<DashboardState>,
        interval: Duration,
    ) -> Self {
        Self {
            source,
            state,
            interval: interval.max(Duration::from_secs(1)),
            running: AtomicBool::new(false),
        }
    }

    pub fn state(&self) -> &Arc<DashboardState> {
        &self.state
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Run one fetch, render and apply cycle.
    ///
    /// Failures are logged and recorded, never returned as errors.
    pub async fn refresh(&self) -> RefreshOutcome {
        let ticket = self.state.issue_ticket();
        self.state.record_attempt().await;

        let snapshot = match self.source.fetch().await {
            Ok(snapshot) => snapshot,
            Err(e) => {
                tracing::error!(
                    ticket,
                    source = %self.source.describe(),
                    error = %e,
                    "Failed to load dashboard snapshot"
                );
                self.state.record_failure(ticket, &e).await;
                return RefreshOutcome::Failed {
                    ticket,
                    error: e.to_string(),
                };
            }
        };

        let rendered = RenderedDashboard::render(ticket, snapshot);
        let accounts = rendered.account_count();

        if self.state.apply(rendered).await {
            tracing::info!(ticket, accounts, "Dashboard refreshed");
            RefreshOutcome::Applied { ticket, accounts }
        } else {
            tracing::debug!(ticket, "Discarding render superseded by a newer refresh");
            RefreshOutcome::Superseded { ticket }
        }
    }

    /// Start the refresh loop.
    ///
    /// The first tick fires immediately. Each tick spawns its own refresh, so a
    /// fetch slower than the interval never holds back the next one.
    pub fn start(self: Arc<Self>) -> tokio::task::JoinHandle<()> {
        self.running.store(true, Ordering::SeqCst);

        tracing::info!(
            interval_secs = self.interval.as_secs(),
            source = %self.source.describe(),
            "Starting dashboard refresh loop"
        );

        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(self.interval);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

            loop {
                ticker.tick().await;

                if !self.running.load(Ordering::SeqCst) {
                    break;
                }

                let refresher = Arc::clone(&self);
                tokio::spawn(async move {
                    refresher.refresh().await;
                });
            }

            tracing::info!("Dashboard refresh loop stopped");
        })
    }

    /// Stop the loop at its next tick. Refreshes already in flight finish.
    pub fn stop(&self) {
        self.running.store(false, Ordering::SeqCst);
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }
}
