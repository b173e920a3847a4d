//! Sync engine
//!
//! The moving parts behind the two binaries:
//! - [`keys`] - local-path-to-object-key mapping, content types, object URLs
//! - [`retry`] - exponential-backoff retry for remote writes
//! - [`pool`] - bounded worker pool over a shared cursor
//! - [`upload`] - directory walk + concurrent upload orchestration
//! - [`purge`] - paginated listing + concurrent deletion under a prefix
//! - [`outcome`] - per-item outcomes and the run summary

pub mod keys;
pub mod outcome;
pub mod pool;
pub mod purge;
pub mod retry;
pub mod upload;

pub use outcome::{DeleteOutcome, RunSummary, UploadOutcome};
pub use purge::{purge_prefix, PurgeOptions};
pub use upload::{upload_tree, UploadOptions};
