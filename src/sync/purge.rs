//! Prefix purge
//!
//! Enumerates every object under the prefix first (a listing failure aborts
//! the run before anything is deleted), then deletes the collected keys
//! through the bounded worker pool.

use anyhow::{Context, Result};

use crate::config;
use crate::s3::R2Client;
use crate::sync::outcome::{DeleteOutcome, RunSummary};
use crate::sync::pool::run_pool;

/// Settings for one purge run.
#[derive(Debug, Clone)]
pub struct PurgeOptions {
    /// Only objects whose key starts with this prefix are touched.
    pub prefix: String,
    /// Maximum concurrent in-flight deletes.
    pub concurrency: usize,
    /// Listing page size.
    pub page_size: i32,
}

impl Default for PurgeOptions {
    fn default() -> Self {
        Self {
            prefix: config::PREFIX.to_string(),
            concurrency: config::DEFAULT_CONCURRENCY,
            page_size: config::LIST_PAGE_SIZE,
        }
    }
}

/// Delete every object under `opts.prefix` from the client's bucket.
///
/// Per-key failures are isolated and counted; only the initial listing can
/// fail the run as a whole.
pub async fn purge_prefix(client: &R2Client, opts: &PurgeOptions) -> Result<RunSummary> {
    tracing::info!("Deleting existing files in path: {}", opts.prefix);

    let keys = client
        .list_all_keys(&opts.prefix, opts.page_size)
        .await
        .with_context(|| format!("failed to enumerate objects under {}", opts.prefix))?;

    if keys.is_empty() {
        tracing::info!("No existing files found to delete.");
        return Ok(RunSummary::default());
    }

    tracing::info!("Found {} files to delete.", keys.len());

    let client = client.clone();
    let outcomes = run_pool(keys, opts.concurrency.max(1), move |key: String| {
        let client = client.clone();
        async move {
            match client.delete_object(&key).await {
                Ok(()) => {
                    tracing::info!("Deleted: {}", key);
                    DeleteOutcome::Deleted { key }
                }
                Err(err) => {
                    tracing::error!("Failed to delete {}: {:#}", key, err);
                    DeleteOutcome::Failed {
                        key,
                        error: format!("{:#}", err),
                    }
                }
            }
        }
    })
    .await?;

    Ok(RunSummary::tally(outcomes.iter().map(|o| o.is_success())))
}
