//! Upload configuration

use super::*;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Upload configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadConfig {
    /// Maximum product uploads in flight at once
    #[serde(default = "default_max_concurrent_uploads")]
    pub max_concurrent_uploads: usize,
    /// Per-request timeout in seconds (`null` leaves it to the transport)
    #[serde(default = "default_upload_timeout_secs")]
    pub timeout_secs: Option<u64>,
    /// Content type for files without a declared MIME type
    #[serde(default = "default_content_type")]
    pub default_content_type: String,
    /// Delete already-uploaded objects when a batch fails
    #[serde(default)]
    pub cleanup_on_failure: bool,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            max_concurrent_uploads: default_max_concurrent_uploads(),
            timeout_secs: default_upload_timeout_secs(),
            default_content_type: default_content_type(),
            cleanup_on_failure: false,
        }
    }
}

impl UploadConfig {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    /// Set the concurrency cap (at least 1)
    pub fn with_max_concurrent_uploads(mut self, max: usize) -> Self {
        self.max_concurrent_uploads = max.max(1);
        self
    }

    pub fn with_cleanup_on_failure(mut self, cleanup: bool) -> Self {
        self.cleanup_on_failure = cleanup;
        self
    }
}
