//! Artifact existence probe used by the polling strategy

use crate::core::retrieval::ArtifactLocation;
use crate::utils::error::{OptimizerError, Result};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use std::time::Duration;
use tracing::debug;

/// Checks whether a processed bundle is available yet
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ArtifactProbe: Send + Sync {
    /// `Ok(false)` means "not there yet"; errors are transient probe faults
    async fn exists(&self, location: &ArtifactLocation) -> Result<bool>;
}

/// `HEAD` request against the artifact URL
#[derive(Debug, Clone)]
pub struct HttpArtifactProbe {
    client: Client,
    timeout: Option<Duration>,
}

impl HttpArtifactProbe {
    pub fn new(timeout: Option<Duration>) -> Result<Self> {
        let client = Client::builder()
            .build()
            .map_err(|e| OptimizerError::config(format!("Failed to create HTTP client: {}", e)))?;
        Ok(Self::with_client(client, timeout))
    }

    pub fn with_client(client: Client, timeout: Option<Duration>) -> Self {
        Self { client, timeout }
    }
}

#[async_trait]
impl ArtifactProbe for HttpArtifactProbe {
    async fn exists(&self, location: &ArtifactLocation) -> Result<bool> {
        let mut request = self.client.head(location.url().clone());
        if let Some(timeout) = self.timeout {
            request = request.timeout(timeout);
        }

        let status = request.send().await?.status();
        debug!(url = %location, status = status.as_u16(), "Probed artifact");

        match status {
            s if s.is_success() => Ok(true),
            // Object stores answer 403 for missing keys when listing is denied
            StatusCode::NOT_FOUND | StatusCode::FORBIDDEN => Ok(false),
            s => Err(OptimizerError::artifact(format!(
                "HEAD {} returned status {}",
                location, s
            ))),
        }
    }
}
