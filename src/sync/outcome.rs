//! Per-item outcomes and the run summary
//!
//! Failures never cross a worker boundary as errors; each item produces a
//! tagged outcome and the run reduces them to counts.

use serde::{Deserialize, Serialize};

/// Result of one file upload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum UploadOutcome {
    /// File stored under `key`, reachable at `url`.
    Uploaded { key: String, url: String },
    /// Upload failed after exhausting the retry budget.
    Failed { key: String, error: String },
}

impl UploadOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, UploadOutcome::Uploaded { .. })
    }

    pub fn key(&self) -> &str {
        match self {
            UploadOutcome::Uploaded { key, .. } => key,
            UploadOutcome::Failed { key, .. } => key,
        }
    }
}

/// Result of one object deletion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum DeleteOutcome {
    Deleted { key: String },
    Failed { key: String, error: String },
}

impl DeleteOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, DeleteOutcome::Deleted { .. })
    }
}

/// Aggregate counts for a run. Printed and discarded; nothing persists
/// across runs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
}

impl RunSummary {
    /// Record one item outcome.
    pub fn record(&mut self, success: bool) {
        self.total += 1;
        if success {
            self.succeeded += 1;
        } else {
            self.failed += 1;
        }
    }

    /// Reduce a sequence of success flags to a summary.
    pub fn tally(results: impl IntoIterator<Item = bool>) -> Self {
        let mut summary = Self::default();
        for success in results {
            summary.record(success);
        }
        summary
    }
}
