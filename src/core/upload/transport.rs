//! Object storage transport
//!
//! One `PUT {base}/{percent-encoded key}` per file, no internal retry.

use super::types::{UploadError, UploadFailure};
use crate::config::{EndpointsConfig, UploadConfig};
use crate::core::batch::StorageKey;
use crate::utils::error::{OptimizerError, Result};
use async_trait::async_trait;
use bytes::Bytes;
use reqwest::Client;
use reqwest::header::CONTENT_TYPE;
use std::time::Duration;
use tracing::debug;
use url::Url;

/// Idle connection keepalive for the upload client
const POOL_IDLE_TIMEOUT_SECS: u64 = 90;

/// Low-level object writes, implemented by each backend
#[async_trait]
pub trait UploadTransport: Send + Sync {
    /// Write the full payload under `key`. 2xx is success.
    async fn put_object(
        &self,
        key: &StorageKey,
        body: Bytes,
        content_type: &str,
    ) -> std::result::Result<(), UploadError>;

    /// Remove an object written earlier (compensating cleanup only)
    async fn delete_object(&self, key: &StorageKey) -> std::result::Result<(), UploadError>;
}

/// Build the object URL for `key` under `base`.
///
/// The key is pushed as a single path segment, so `/`, spaces, `?` and `#`
/// inside original filenames are percent-encoded.
pub fn object_url(base: &Url, key: &StorageKey) -> std::result::Result<Url, UploadFailure> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|_| UploadFailure::InvalidUrl(format!("{} cannot be a base URL", base)))?
        .pop_if_empty()
        .push(key.as_str());
    Ok(url)
}

/// HTTP implementation against an object-storage-backed endpoint
#[derive(Debug, Clone)]
pub struct HttpUploadTransport {
    client: Client,
    base_url: Url,
    timeout: Option<Duration>,
}

impl HttpUploadTransport {
    /// Create a transport with its own connection pool
    pub fn new(base_url: Url, timeout: Option<Duration>) -> Result<Self> {
        let client = Client::builder()
            .pool_idle_timeout(Duration::from_secs(POOL_IDLE_TIMEOUT_SECS))
            .build()
            .map_err(|e| OptimizerError::config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self::with_client(client, base_url, timeout))
    }

    /// Create a transport sharing an existing client
    pub fn with_client(client: Client, base_url: Url, timeout: Option<Duration>) -> Self {
        Self {
            client,
            base_url,
            timeout,
        }
    }

    pub fn from_config(endpoints: &EndpointsConfig, upload: &UploadConfig) -> Result<Self> {
        let base_url = Url::parse(&endpoints.upload_base_url)?;
        Self::new(base_url, upload.timeout())
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn url_for(&self, key: &StorageKey) -> std::result::Result<Url, UploadError> {
        object_url(&self.base_url, key).map_err(|cause| UploadError::new(key.clone(), cause))
    }

    fn classify(key: &StorageKey, err: reqwest::Error) -> UploadError {
        let cause = if err.is_timeout() {
            UploadFailure::Timeout
        } else {
            UploadFailure::Network(err.to_string())
        };
        UploadError::new(key.clone(), cause)
    }

    async fn send(
        &self,
        key: &StorageKey,
        request: reqwest::RequestBuilder,
    ) -> std::result::Result<(), UploadError> {
        let request = match self.timeout {
            Some(timeout) => request.timeout(timeout),
            None => request,
        };

        let response = request.send().await.map_err(|e| Self::classify(key, e))?;
        let status = response.status();

        if status.is_success() {
            Ok(())
        } else {
            Err(UploadError::new(
                key.clone(),
                UploadFailure::Status(status.as_u16()),
            ))
        }
    }
}

#[async_trait]
impl UploadTransport for HttpUploadTransport {
    async fn put_object(
        &self,
        key: &StorageKey,
        body: Bytes,
        content_type: &str,
    ) -> std::result::Result<(), UploadError> {
        let url = self.url_for(key)?;
        debug!(key = %key, url = %url, size = body.len(), "PUT object");

        let request = self
            .client
            .put(url)
            .header(CONTENT_TYPE, content_type)
            .body(body);
        self.send(key, request).await
    }

    async fn delete_object(&self, key: &StorageKey) -> std::result::Result<(), UploadError> {
        let url = self.url_for(key)?;
        debug!(key = %key, url = %url, "DELETE object");

        let request = self.client.delete(url);
        self.send(key, request).await
    }
}
