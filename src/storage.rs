//! Object storage client for uploaded images.
//!
//! Objects are written to `{base}/storage/v1/object/{bucket}/{key}` and served
//! from the bucket's public URL.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use thiserror::Error;

use crate::config::SupabaseConfig;

const OBJECT_PATH: &str = "storage/v1/object";
const UPLOAD_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Storage API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("Invalid storage credential: {0}")]
    Credential(String),
}

#[derive(Clone)]
pub struct ObjectStorage {
    inner: Arc<ObjectStorageInner>,
}

struct ObjectStorageInner {
    client: reqwest::Client,
    base_url: String,
    bucket: String,
}

impl ObjectStorage {
    pub fn new(config: &SupabaseConfig, bucket: impl Into<String>) -> Result<Self, StorageError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            "apikey",
            HeaderValue::from_str(&config.service_key)
                .map_err(|e| StorageError::Credential(e.to_string()))?,
        );
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", config.service_key))
                .map_err(|e| StorageError::Credential(e.to_string()))?,
        );

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(UPLOAD_TIMEOUT)
            .build()?;

        Ok(Self {
            inner: Arc::new(ObjectStorageInner {
                client,
                base_url: config.url.trim_end_matches('/').to_string(),
                bucket: bucket.into(),
            }),
        })
    }

    pub fn bucket(&self) -> &str {
        &self.inner.bucket
    }

    pub fn public_url(&self, key: &str) -> String {
        format!(
            "{}/{}/public/{}/{}",
            self.inner.base_url, OBJECT_PATH, self.inner.bucket, key
        )
    }

    /// Stores `bytes` under `key` without overwriting, returning the public URL.
    pub async fn upload(
        &self,
        key: &str,
        content_type: &'static str,
        bytes: Vec<u8>,
    ) -> Result<String, StorageError> {
        let url = format!(
            "{}/{}/{}/{}",
            self.inner.base_url, OBJECT_PATH, self.inner.bucket, key
        );

        let response = self
            .inner
            .client
            .post(&url)
            .header(CONTENT_TYPE, content_type)
            .header("x-upsert", "false")
            .body(bytes)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            return Ok(self.public_url(key));
        }

        let message = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        Err(StorageError::Api {
            status: status.as_u16(),
            message,
        })
    }
}

impl std::fmt::Debug for ObjectStorage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ObjectStorage")
            .field("base_url", &self.inner.base_url)
            .field("bucket", &self.inner.bucket)
            .finish_non_exhaustive()
    }
}

/// Replaces every character outside `[A-Za-z0-9._-]` with `-`.
pub fn sanitize_filename(filename: &str) -> String {
    filename
        .trim()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '-'
            }
        })
        .collect()
}

/// Timestamp-prefixed key so repeated uploads of one filename never collide.
pub fn object_key(filename: &str, now: DateTime<Utc>) -> String {
    format!("{}-{}", now.timestamp_millis(), sanitize_filename(filename))
}

pub fn content_type_for(filename: &str) -> &'static str {
    let extension = filename
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "webp" => "image/webp",
        "gif" => "image/gif",
        "svg" => "image/svg+xml",
        _ => "application/octet-stream",
    }
}
