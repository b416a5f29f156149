//! Dashboard State
//!
//! Holds the last applied render. A render replaces the previous one in a
//! single write; readers never see a partially built dashboard.
//!
//! Every refresh takes a ticket before it starts fetching. A render is only
//! applied when its ticket is newer than the one already on display, so a slow
//! fetch that resolves late cannot overwrite fresher data.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::render::render_dashboard;
use crate::snapshot::{Snapshot, SnapshotError};

/// A fully rendered dashboard and the snapshot it came from
#[derive(Debug, Clone)]
pub struct RenderedDashboard {
    pub ticket: u64,
    pub html: String,
    pub snapshot: Snapshot,
    pub rendered_at: DateTime<Utc>,
}

impl RenderedDashboard {
    /// Render every card of `snapshot` for the refresh holding `ticket`
    pub fn render(ticket: u64, snapshot: Snapshot) -> Self {
        Self {
            ticket,
            html: render_dashboard(&snapshot),
            snapshot,
            rendered_at: Utc::now(),
        }
    }

    pub fn account_count(&self) -> usize {
        self.snapshot.accounts.len()
    }
}

/// Outcome counters and timestamps of the refresh cycles so far
#[derive(Debug, Clone, Default, Serialize)]
pub struct RefreshStatus {
    pub last_attempt: Option<DateTime<Utc>>,
    pub last_success: Option<DateTime<Utc>>,
    /// Error of the newest failed cycle, cleared by a newer success
    pub last_error: Option<String>,
    /// Ticket of the render currently on display, 0 before the first one
    pub applied_ticket: u64,
    pub refreshes_applied: u64,
    pub refreshes_failed: u64,
    /// Successful cycles dropped because a newer render was already applied
    pub refreshes_superseded: u64,
    pub account_count: usize,
    pub event_ended: bool,
}

/// The dashboard container
pub struct DashboardState {
    next_ticket: AtomicU64,
    current: RwLock<Option<Arc<RenderedDashboard>>>,
    status: RwLock<RefreshStatus>,
}

impl DashboardState {
    pub fn new() -> Self {
        Self {
            next_ticket: AtomicU64::new(0),
            current: RwLock::new(None),
            status: RwLock::new(RefreshStatus::default()),
        }
    }

    /// Reserve the next refresh ticket. Tickets start at 1 and only grow.
    pub fn issue_ticket(&self) -> u64 {
        self.next_ticket.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Note that a refresh cycle has started
    pub async fn record_attempt(&self) {
        self.status.write().await.last_attempt = Some(Utc::now());
    }

    /// Apply a render if it is newer than the one on display.
    ///
    /// Returns `false` when the render was superseded and dropped.
    pub async fn apply(&self, rendered: RenderedDashboard) -> bool {
        let mut current = self.current.write().await;

        let applied_ticket = (*current).as_ref().map(|r| r.ticket).unwrap_or(0);
        if rendered.ticket <= applied_ticket {
            self.status.write().await.refreshes_superseded += 1;
            return false;
        }

        let mut status = self.status.write().await;
        status.last_success = Some(rendered.rendered_at);
        status.last_error = None;
        status.applied_ticket = rendered.ticket;
        status.refreshes_applied += 1;
        status.account_count = rendered.account_count();
        status.event_ended = rendered.snapshot.event_ended;

        *current = Some(Arc::new(rendered));
        true
    }

    /// Record a failed cycle. The dashboard on display is left untouched.
    pub async fn record_failure(&self, ticket: u64, error: &SnapshotError) {
        let mut status = self.status.write().await;
        status.refreshes_failed += 1;
        if ticket > status.applied_ticket {
            status.last_error = Some(error.to_string());
        }
    }

    /// The render on display, if any refresh has succeeded yet
    pub async fn current(&self) -> Option<Arc<RenderedDashboard>> {
        self.current.read().await.clone()
    }

    /// Dashboard markup, empty before the first successful refresh
    pub async fn html(&self) -> String {
        match &*self.current.read().await {
            Some(rendered) => rendered.html.clone(),
            None => String::new(),
        }
    }

    pub async fn status(&self) -> RefreshStatus {
        self.status.read().await.clone()
    }

    /// Whether a dashboard has been applied at least once
    pub async fn is_ready(&self) -> bool {
        self.current.read().await.is_some()
    }
}

impl Default for DashboardState {
    fn default() -> Self {
        Self::new()
    }
}
