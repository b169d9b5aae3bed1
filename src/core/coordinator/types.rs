//! Coordinator result types

use crate::core::batch::{BatchId, StorageKey};
use crate::core::upload::UploadError;
use serde::Serialize;
use std::time::Duration;
use thiserror::Error;

/// Summary of a fully successful batch upload
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UploadReport {
    pub batch_id: BatchId,
    /// Keys in upload order: reference first, then products by ordinal
    pub keys: Vec<StorageKey>,
    pub total_bytes: u64,
    pub duration: Duration,
}

/// Aggregate failure of a batch upload
#[derive(Error, Debug, Clone, Default)]
#[error("{}", self.summary())]
pub struct BatchUploadError {
    /// Keys whose upload was attempted and failed
    pub failed_keys: Vec<StorageKey>,
    /// Product keys never attempted because the reference upload failed
    pub skipped_keys: Vec<StorageKey>,
    /// Keys written successfully before the batch was aborted
    pub succeeded_keys: Vec<StorageKey>,
    /// One entry per failed key, same order as `failed_keys`
    pub errors: Vec<UploadError>,
    /// Succeeded keys whose compensating delete also failed
    pub cleanup_failed_keys: Vec<StorageKey>,
    /// First recorded failure
    #[source]
    pub(crate) source: Option<UploadError>,
}

impl BatchUploadError {
    pub(crate) fn push_failure(&mut self, error: UploadError) {
        self.failed_keys.push(error.key.clone());
        if self.source.is_none() {
            self.source = Some(error.clone());
        }
        self.errors.push(error);
    }

    /// Whether the batch did not succeed
    pub fn has_failures(&self) -> bool {
        !self.failed_keys.is_empty()
    }

    fn summary(&self) -> String {
        let mut message = format!("Batch upload failed for {} file(s)", self.failed_keys.len());
        if let Some(first) = self.errors.first() {
            message.push_str(&format!(": {}", first));
            if self.errors.len() > 1 {
                message.push_str(&format!(" (and {} more)", self.errors.len() - 1));
            }
        }
        if !self.skipped_keys.is_empty() {
            message.push_str(&format!(
                "; {} product upload(s) skipped",
                self.skipped_keys.len()
            ));
        }
        if !self.cleanup_failed_keys.is_empty() {
            message.push_str(&format!(
                "; cleanup failed for {} object(s)",
                self.cleanup_failed_keys.len()
            ));
        }
        message
    }
}
