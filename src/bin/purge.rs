//! Purge entry point
//!
//! Deletes every object under the fixed prefix. A listing failure exits
//! non-zero before anything is deleted; per-object delete failures are
//! counted, not fatal.

use anyhow::Result;
use r2_sync::config::{self, R2Config};
use r2_sync::s3::R2Client;
use r2_sync::sync::{purge_prefix, PurgeOptions};
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

    let summary = purge_prefix(&client, &PurgeOptions::default()).await?;

    tracing::info!(
        "Delete completed. Success: {}, Failed: {}",
        summary.succeeded,
        summary.failed
    );

    Ok(())
}
