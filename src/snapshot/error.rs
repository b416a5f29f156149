//! Snapshot error types
//!
//! Everything that can make a single refresh cycle fail: transport problems,
//! unexpected HTTP statuses, unreadable files and malformed documents.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while fetching or parsing a snapshot document
#[derive(Error, Debug)]
pub enum SnapshotError {
    /// Network or transport failure
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The server answered, but not with a success status
    #[error("Unexpected HTTP status {status} from {url}")]
    Status { status: u16, url: String },

    /// Local snapshot file could not be read
    #[error("Failed to read snapshot file {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Body is not JSON, or does not match the snapshot schema
    #[error("Malformed snapshot: {0}")]
    Parse(#[from] serde_json::Error),

    /// Source configuration cannot be used
    #[error("Invalid snapshot source: {0}")]
    InvalidSource(String),
}

/// Result type alias for snapshot operations
pub type SnapshotResult<T> = Result<T, SnapshotError>;
