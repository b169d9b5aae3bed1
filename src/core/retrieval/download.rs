//! Artifact download
//!
//! The orchestrator only produces the artifact location. Fetching it is the
//! caller's job; this helper does that for command-line callers.

use super::locator::ArtifactLocation;
use crate::utils::error::{OptimizerError, Result};
use crate::utils::format_bytes;
use futures::StreamExt;
use reqwest::Client;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info, warn};

/// Fetches a processed bundle and writes it to disk
#[derive(Debug, Clone)]
pub struct ArtifactDownloader {
    client: Client,
    timeout: Option<Duration>,
}

impl ArtifactDownloader {
    pub fn new(timeout: Option<Duration>) -> Result<Self> {
        let client = Client::builder()
            .build()
            .map_err(|e| OptimizerError::config(format!("Failed to create HTTP client: {}", e)))?;
        Ok(Self::with_client(client, timeout))
    }

    pub fn with_client(client: Client, timeout: Option<Duration>) -> Self {
        Self { client, timeout }
    }

    /// Download the bundle into `dest_dir`, returning the written path
    pub async fn download(&self, location: &ArtifactLocation, dest_dir: &Path) -> Result<PathBuf> {
        debug!(url = %location, "GET artifact");

        let mut request = self.client.get(location.url().clone());
        if let Some(timeout) = self.timeout {
            request = request.timeout(timeout);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(OptimizerError::artifact(format!(
                "GET {} returned status {}",
                location, status
            )));
        }

        tokio::fs::create_dir_all(dest_dir).await?;
        let path = dest_dir.join(location.file_name());
        let partial = dest_dir.join(format!("{}.part", location.file_name()));

        let written = match write_body(response, &partial).await {
            Ok(written) => written,
            Err(e) => {
                warn!(path = ?partial, error = %e, "Artifact download interrupted");
                let _ = tokio::fs::remove_file(&partial).await;
                return Err(e);
            }
        };
        tokio::fs::rename(&partial, &path).await?;

        info!(path = ?path, size = %format_bytes(written), "Artifact downloaded");
        Ok(path)
    }
}

async fn write_body(response: reqwest::Response, path: &Path) -> Result<u64> {
    let mut file = tokio::fs::File::create(path).await?;
    let mut written = 0u64;
    let mut body = response.bytes_stream();
    while let Some(chunk) = body.next().await {
        let chunk = chunk?;
        file.write_all(&chunk).await?;
        written += chunk.len() as u64;
    }
    file.flush().await?;
    Ok(written)
}
