//! Bulk directory uploader and prefix purger for S3-compatible object storage.
//!
//! This crate pushes a local directory tree to a Cloudflare R2 bucket under a
//! fixed key prefix, and can wipe everything under that prefix again. The
//! public modules are usable as a library; the `r2-upload` and `r2-purge`
//! binaries are thin wrappers around them.

pub mod config;
pub mod s3;
pub mod sync;
