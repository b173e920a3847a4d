//! R2 client wrapper module
//!
//! Thin layer over the AWS S3 SDK, scoped to the operations the sync tool
//! needs:
//! - [`client::R2Client`] - put / list / delete against a single bucket
//! - [`types`] - listing page data

pub mod client;
pub mod types;

pub use client::{ClientConfig, R2Client};
pub use types::ListPage;
