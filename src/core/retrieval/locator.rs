//! Artifact location
//!
//! The processed bundle for a batch lives at
//! `{base}/{download_id}/scaled/{download_id}_scaled.zip`.

use crate::core::batch::BatchId;
use crate::utils::error::{OptimizerError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use url::Url;

/// Separator at which the batch id is cut to obtain the download id
const DOWNLOAD_ID_SEPARATOR: char = '-';

/// Fixed path segment between the download id and the bundle name
const SCALED_SEGMENT: &str = "scaled";

/// Identifier used by the processing service to name its output
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DownloadId(String);

impl DownloadId {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// File name of the processed bundle
    pub fn bundle_file_name(&self) -> String {
        format!("{}_scaled.zip", self.0)
    }
}

impl fmt::Display for DownloadId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Map a batch id to the id the processing service names its output after:
/// everything before the first `-`, or the whole id when there is none.
///
/// For a UUID v4 batch id this is the first 8 hex digits.
pub fn download_id(batch_id: &BatchId) -> DownloadId {
    let id = batch_id.as_str();
    let prefix = id
        .split_once(DOWNLOAD_ID_SEPARATOR)
        .map_or(id, |(prefix, _)| prefix);
    DownloadId(prefix.to_string())
}

/// Where the processed bundle of a batch is expected to be
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactLocation {
    download_id: DownloadId,
    url: Url,
}

impl ArtifactLocation {
    pub fn download_id(&self) -> &DownloadId {
        &self.download_id
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn as_str(&self) -> &str {
        self.url.as_str()
    }

    pub fn file_name(&self) -> String {
        self.download_id.bundle_file_name()
    }
}

impl fmt::Display for ArtifactLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.url.as_str())
    }
}

/// Builds artifact locations from batch identities
#[derive(Debug, Clone)]
pub struct ArtifactLocator {
    base_url: Url,
}

impl ArtifactLocator {
    pub fn new(base_url: Url) -> Result<Self> {
        if base_url.cannot_be_a_base() {
            return Err(OptimizerError::config(format!(
                "Artifact base URL cannot be a base: {}",
                base_url
            )));
        }
        Ok(Self { base_url })
    }

    pub fn parse(base_url: &str) -> Result<Self> {
        Self::new(Url::parse(base_url)?)
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Location of the bundle for `batch_id`. Existence is not checked.
    pub fn locate(&self, batch_id: &BatchId) -> Result<ArtifactLocation> {
        let download_id = download_id(batch_id);

        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| {
                OptimizerError::config(format!(
                    "Artifact base URL cannot be a base: {}",
                    self.base_url
                ))
            })?
            .pop_if_empty()
            .push(download_id.as_str())
            .push(SCALED_SEGMENT)
            .push(&download_id.bundle_file_name());

        Ok(ArtifactLocation { download_id, url })
    }
}
