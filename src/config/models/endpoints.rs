//! Remote endpoint configuration

use super::*;
use serde::{Deserialize, Serialize};

/// Base URLs of the object store upload endpoint and the artifact host
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EndpointsConfig {
    /// Objects are written to `{upload_base_url}/{key}`
    #[serde(default = "default_upload_base_url")]
    pub upload_base_url: String,
    /// Bundles are read from `{artifact_base_url}/{id}/scaled/{id}_scaled.zip`
    #[serde(default = "default_artifact_base_url")]
    pub artifact_base_url: String,
}

impl Default for EndpointsConfig {
    fn default() -> Self {
        Self {
            upload_base_url: default_upload_base_url(),
            artifact_base_url: default_artifact_base_url(),
        }
    }
}
