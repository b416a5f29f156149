//! Snapshot Document
//!
//! Types for the externally produced `data.json` document and the sources a
//! refresh can read it from.

mod error;
mod source;
mod types;

pub use error::{SnapshotError, SnapshotResult};
pub use source::{build_source, FileSource, HttpSource, SnapshotSource};
pub use types::{Account, LpChange, Match, RankInfo, Snapshot, Tier, UNKNOWN_LP, VICTORY};
