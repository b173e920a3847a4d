//! R2 client wrapper

use anyhow::{Context, Result};
use aws_sdk_s3::config::{Credentials, Region};
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client;

use crate::config::R2Config;
use crate::s3::types::ListPage;

/// Explicit client configuration.
///
/// Production runs derive this from [`R2Config`]; the integration tests
/// build one pointing at a local MinIO container instead.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub endpoint_url: String,
    pub region: String,
    pub access_key_id: String,
    pub secret_access_key: String,
    /// Path-style addressing; required for MinIO, off for R2.
    pub force_path_style: bool,
}

impl From<&R2Config> for ClientConfig {
    fn from(config: &R2Config) -> Self {
        Self {
            endpoint_url: config.endpoint_url(),
            // R2 is region-agnostic; the SDK still wants a region name.
            region: "auto".to_string(),
            access_key_id: config.access_key_id.clone(),
            secret_access_key: config.secret_access_key.clone(),
            force_path_style: false,
        }
    }
}

/// S3 client bound to a single bucket, with the high-level operations the
/// sync tool needs.
#[derive(Clone)]
pub struct R2Client {
    client: Client,
    bucket: String,
    endpoint_url: String,
}

impl R2Client {
    /// Create a client for the given R2 account and bucket.
    pub async fn new(config: &R2Config, bucket: &str) -> Result<Self> {
        Self::with_config(ClientConfig::from(config), bucket).await
    }

    /// Create a client from an explicit endpoint/credentials configuration.
    pub async fn with_config(config: ClientConfig, bucket: &str) -> Result<Self> {
        let credentials = Credentials::new(
            config.access_key_id.clone(),
            config.secret_access_key.clone(),
            None,
            None,
            "r2-sync",
        );

        let sdk_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .region(Region::new(config.region.clone()))
            .credentials_provider(credentials)
            .endpoint_url(&config.endpoint_url)
            .load()
            .await;

        let s3_config = aws_sdk_s3::config::Builder::from(&sdk_config)
            .force_path_style(config.force_path_style)
            .build();

        Ok(Self {
            client: Client::from_conf(s3_config),
            bucket: bucket.to_string(),
            endpoint_url: config.endpoint_url,
        })
    }

    /// The bucket this client operates on.
    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    /// Default public URL of an object: `endpoint/bucket/key`.
    pub fn object_url(&self, key: &str) -> String {
        format!("{}/{}/{}", self.endpoint_url, self.bucket, key)
    }

    /// Upload a byte stream under `key` with the given content type and
    /// cache-control header. Overwrites any existing object.
    pub async fn put_object(
        &self,
        key: &str,
        body: ByteStream,
        content_type: &str,
        cache_control: &str,
    ) -> Result<()> {
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .body(body)
            .content_type(content_type)
            .cache_control(cache_control)
            .send()
            .await
            .with_context(|| format!("failed to put object {}", key))?;

        Ok(())
    }

    /// Fetch one page of object keys under `prefix`.
    pub async fn list_page(
        &self,
        prefix: &str,
        continuation_token: Option<&str>,
        max_keys: i32,
    ) -> Result<ListPage> {
        let mut request = self
            .client
            .list_objects_v2()
            .bucket(&self.bucket)
            .prefix(prefix)
            .max_keys(max_keys);

        if let Some(token) = continuation_token {
            request = request.continuation_token(token);
        }

        let response = request
            .send()
            .await
            .with_context(|| format!("failed to list objects under {}", prefix))?;

        let keys = response
            .contents()
            .iter()
            .filter_map(|obj| obj.key().map(|k| k.to_string()))
            .collect();

        Ok(ListPage {
            keys,
            next_continuation_token: response.next_continuation_token().map(|s| s.to_string()),
        })
    }

    /// Enumerate every object key under `prefix`, following continuation
    /// tokens until the listing is exhausted.
    pub async fn list_all_keys(&self, prefix: &str, page_size: i32) -> Result<Vec<String>> {
        let mut keys = Vec::new();
        let mut token: Option<String> = None;

        loop {
            let page = self.list_page(prefix, token.as_deref(), page_size).await?;
            keys.extend(page.keys);
            match page.next_continuation_token {
                Some(next) => token = Some(next),
                None => break,
            }
        }

        Ok(keys)
    }

    /// Delete an object. Deleting a key that does not exist succeeds, per S3
    /// semantics.
    pub async fn delete_object(&self, key: &str) -> Result<()> {
        self.client
            .delete_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .with_context(|| format!("failed to delete object {}", key))?;

        Ok(())
    }

    /// Download an object to bytes.
    pub async fn get_object(&self, key: &str) -> Result<Vec<u8>> {
        let response = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .with_context(|| format!("failed to get object {}", key))?;

        let data = response.body.collect().await?;
        Ok(data.into_bytes().to_vec())
    }

    /// Create the bucket this client is bound to. Used by tests against
    /// MinIO, where the bucket does not pre-exist.
    pub async fn create_bucket(&self) -> Result<()> {
        self.client
            .create_bucket()
            .bucket(&self.bucket)
            .send()
            .await
            .with_context(|| format!("failed to create bucket {}", self.bucket))?;

        Ok(())
    }
}
