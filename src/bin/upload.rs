//! Upload entry point
//!
//! Walks the fixed upload directory and pushes every file to the bucket
//! under the fixed prefix. Individual file failures are counted, not fatal;
//! a missing upload directory or bad configuration exits non-zero.

use std::path::Path;

use anyhow::Result;
use r2_sync::config::{self, R2Config};
use r2_sync::s3::R2Client;
use r2_sync::sync::{upload_tree, UploadOptions};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let r2_config = R2Config::from_env()?;
    let client = R2Client::new(&r2_config, config::BUCKET).await?;

    let opts = UploadOptions {
        public_domain: r2_config.public_domain.clone(),
        ..UploadOptions::default()
    };

    let summary = upload_tree(&client, Path::new(config::UPLOAD_DIR), &opts).await?;

    tracing::info!(
        "Done. Success: {}, Failed: {}",
        summary.succeeded,
        summary.failed
    );

    Ok(())
}
