//! Upload orchestration
//!
//! Walks the upload root, derives a key per file and pushes everything
//! through the worker pool. A file that fails all retries is recorded and
//! skipped; it never stops the run.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use anyhow::{Context, Result};
use aws_sdk_s3::primitives::ByteStream;
use walkdir::WalkDir;

use crate::config;
use crate::s3::R2Client;
use crate::sync::keys::{content_type, derive_key, public_url};
use crate::sync::outcome::{RunSummary, UploadOutcome};
use crate::sync::pool::run_pool;
use crate::sync::retry::with_retry;

/// Settings for one upload run.
#[derive(Debug, Clone)]
pub struct UploadOptions {
    /// Key prefix prepended to every derived key.
    pub prefix: String,
    /// Maximum concurrent in-flight uploads.
    pub concurrency: usize,
    /// Retries per file after the initial attempt.
    pub max_retries: u32,
    /// Cache-Control header set on every object.
    pub cache_control: String,
    /// Custom domain for reported object URLs.
    pub public_domain: Option<String>,
}

impl Default for UploadOptions {
    fn default() -> Self {
        Self {
            prefix: config::PREFIX.to_string(),
            concurrency: config::DEFAULT_CONCURRENCY,
            max_retries: config::DEFAULT_MAX_RETRIES,
            cache_control: config::CACHE_CONTROL.to_string(),
            public_domain: None,
        }
    }
}

/// Collect all regular files under `root`, in a stable order.
pub fn walk_files(root: &Path) -> Vec<PathBuf> {
    WalkDir::new(root)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .collect()
}

/// Upload every file under `root` to the client's bucket.
///
/// A missing root is fatal and reported before any remote call. Individual
/// file failures are isolated into [`UploadOutcome::Failed`] records; the
/// returned summary counts both sides.
pub async fn upload_tree(
    client: &R2Client,
    root: &Path,
    opts: &UploadOptions,
) -> Result<RunSummary> {
    let root = root
        .canonicalize()
        .with_context(|| format!("Upload directory not found: {}", root.display()))?;

    let files = walk_files(&root);
    if files.is_empty() {
        tracing::info!("No files found to upload.");
        return Ok(RunSummary::default());
    }

    tracing::info!(
        "Found {} files. Uploading to r2://{}/{}",
        files.len(),
        client.bucket(),
        opts.prefix
    );

    let total = files.len();
    let uploaded = Arc::new(AtomicUsize::new(0));

    let client = client.clone();
    let opts = opts.clone();
    let root = Arc::new(root);

    let outcomes = run_pool(files, opts.concurrency.max(1), move |path: PathBuf| {
        let client = client.clone();
        let opts = opts.clone();
        let root = Arc::clone(&root);
        let uploaded = Arc::clone(&uploaded);
        async move { upload_file(&client, &root, &path, &opts, &uploaded, total).await }
    })
    .await?;

    Ok(RunSummary::tally(outcomes.iter().map(|o| o.is_success())))
}

/// Upload a single file, retrying transient failures.
async fn upload_file(
    client: &R2Client,
    root: &Path,
    path: &Path,
    opts: &UploadOptions,
    uploaded: &AtomicUsize,
    total: usize,
) -> UploadOutcome {
    let key = derive_key(root, path, &opts.prefix);
    let content_type = content_type(path);

    // The byte stream is consumed by the request, so each attempt reopens
    // the file.
    let result = with_retry(opts.max_retries, || {
        let key = key.as_str();
        let cache_control = opts.cache_control.as_str();
        async move {
            let body = ByteStream::from_path(path)
                .await
                .with_context(|| format!("failed to open {}", path.display()))?;
            client
                .put_object(key, body, content_type, cache_control)
                .await
        }
    })
    .await;

    match result {
        Ok(()) => {
            let url = match &opts.public_domain {
                Some(domain) => public_url(domain, &key),
                None => client.object_url(&key),
            };
            let done = uploaded.fetch_add(1, Ordering::SeqCst) + 1;
            match &opts.public_domain {
                Some(_) => tracing::info!("[{}/{}] uploaded: {} -> {}", done, total, key, url),
                None => tracing::info!("[{}/{}] uploaded: {}", done, total, key),
            }
            UploadOutcome::Uploaded { key, url }
        }
        Err(err) => {
            tracing::error!("FAILED {}: {:#}", path.display(), err);
            UploadOutcome::Failed {
                key,
                error: format!("{:#}", err),
            }
        }
    }
}
