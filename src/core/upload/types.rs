//! Upload task and transport error types

use crate::core::batch::StorageKey;
use bytes::Bytes;
use thiserror::Error;

/// One object write: created when a batch upload starts, terminal on the
/// transport's answer, never retried
#[derive(Debug, Clone)]
pub struct UploadTask {
    /// Derived storage key
    pub key: StorageKey,
    /// Full payload, sent in one request
    pub body: Bytes,
    /// Declared MIME type
    pub content_type: String,
}

/// Why a single upload failed
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UploadFailure {
    /// Endpoint answered outside 200..=299
    #[error("unexpected HTTP status {0}")]
    Status(u16),

    /// Connection-level fault
    #[error("network error: {0}")]
    Network(String),

    /// The request exceeded the configured timeout
    #[error("request timed out")]
    Timeout,

    /// The key could not be turned into an object URL
    #[error("invalid object URL: {0}")]
    InvalidUrl(String),
}

/// Single-file transport failure
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Upload of {key} failed: {cause}")]
pub struct UploadError {
    pub key: StorageKey,
    pub cause: UploadFailure,
}

impl UploadError {
    pub fn new(key: StorageKey, cause: UploadFailure) -> Self {
        Self { key, cause }
    }

    /// Server-side and connection faults may clear up on a manual retry;
    /// client errors will not.
    pub fn is_retryable(&self) -> bool {
        match &self.cause {
            UploadFailure::Status(code) => *code >= 500 || *code == 408 || *code == 429,
            UploadFailure::Network(_) | UploadFailure::Timeout => true,
            UploadFailure::InvalidUrl(_) => false,
        }
    }
}
