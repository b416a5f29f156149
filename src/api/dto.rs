//! Data Transfer Objects
//!
//! Response types for the JSON endpoints.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::dashboard::{RefreshOutcome, RefreshStatus};
use crate::snapshot::Snapshot;

/// Last applied snapshot with its render metadata
#[derive(Debug, Serialize)]
pub struct SnapshotResponse {
    /// Ticket of the refresh that produced it
    pub ticket: u64,
    pub rendered_at: DateTime<Utc>,
    pub snapshot: Snapshot,
}

/// Manual refresh response
#[derive(Debug, Serialize)]
pub struct RefreshResponse {
    #[serde(flatten)]
    pub outcome: RefreshOutcome,
    pub status: RefreshStatus,
}

/// Full health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Overall status: healthy, degraded, starting
    pub status: String,
    /// Dashboard status: ready or waiting
    pub dashboard: String,
    pub last_success: Option<DateTime<Utc>>,
    pub last_error: Option<String>,
    /// Server uptime in seconds
    pub uptime_seconds: u64,
    /// Application version
    pub version: String,
}
