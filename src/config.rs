//! Run configuration
//!
//! Credentials and the account identifier come from environment variables
//! (optionally via a `.env` file loaded by the binaries); everything else is
//! a compile-time constant. There is deliberately no other configuration
//! surface.

use std::env;
use thiserror::Error;

/// Bucket all uploads and deletes operate on.
pub const BUCKET: &str = "sf2-assets";

/// Key prefix namespacing this tool's objects within the bucket.
pub const PREFIX: &str = "jay-test/";

/// Local directory tree uploaded by `r2-upload`.
pub const UPLOAD_DIR: &str = "./dist";

/// Cache-Control header attached to every uploaded object. Static assets are
/// content-addressed by their deploy pipeline, so a long immutable TTL is
/// safe.
pub const CACHE_CONTROL: &str = "public, max-age=31536000, immutable";

/// Number of concurrent workers for both uploads and deletes.
pub const DEFAULT_CONCURRENCY: usize = 8;

/// Retries after the initial attempt of a remote write (so up to 4 attempts
/// in total).
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// Page size used when enumerating objects under a prefix.
pub const LIST_PAGE_SIZE: i32 = 1000;

/// Error raised when a required environment variable is absent.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("environment variable {0} is not set")]
    MissingVar(&'static str),
}

/// Credentials and endpoint configuration for the R2 account, read from the
/// environment.
#[derive(Debug, Clone)]
pub struct R2Config {
    /// Cloudflare account identifier; determines the storage endpoint.
    pub account_id: String,
    pub access_key_id: String,
    pub secret_access_key: String,
    /// Optional custom domain fronting the bucket; when set, reported object
    /// URLs use it instead of the raw storage endpoint.
    pub public_domain: Option<String>,
}

impl R2Config {
    /// Load configuration from `R2_ACCOUNT_ID`, `R2_ACCESS_KEY_ID`,
    /// `R2_SECRET_ACCESS_KEY` and the optional `R2_PUBLIC_DOMAIN`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            account_id: require_var("R2_ACCOUNT_ID")?,
            access_key_id: require_var("R2_ACCESS_KEY_ID")?,
            secret_access_key: require_var("R2_SECRET_ACCESS_KEY")?,
            public_domain: env::var("R2_PUBLIC_DOMAIN").ok().filter(|v| !v.is_empty()),
        })
    }

    /// The account-scoped R2 storage endpoint.
    pub fn endpoint_url(&self) -> String {
        format!("https://{}.r2.cloudflarestorage.com", self.account_id)
    }
}

fn require_var(name: &'static str) -> Result<String, ConfigError> {
    env::var(name)
        .ok()
        .filter(|v| !v.is_empty())
        .ok_or(ConfigError::MissingVar(name))
}
