//! Error types for the optimizer

use crate::core::batch::{BatchId, BatchStatus};
use crate::core::coordinator::BatchUploadError;
use crate::core::upload::UploadError;
use std::time::Duration;
use thiserror::Error;

/// Result type alias for the optimizer
pub type Result<T> = std::result::Result<T, OptimizerError>;

/// Main error type for the optimizer
#[derive(Error, Debug)]
pub enum OptimizerError {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Validation errors (bad identifiers, bad ordinals, bad file handles)
    #[error("Validation error: {0}")]
    Validation(String),

    /// Neither a reference nor any product image was selected
    #[error("No files selected: choose a reference image or at least one product image")]
    NoFilesSelected,

    /// Operation not allowed in the batch's current status
    #[error("Cannot {operation} while batch is {status}")]
    InvalidState {
        operation: &'static str,
        status: BatchStatus,
    },

    /// Single object upload failure
    #[error(transparent)]
    Upload(#[from] UploadError),

    /// Aggregate failure of a batch upload
    #[error(transparent)]
    BatchUpload(#[from] BatchUploadError),

    /// Remote processing did not complete in time
    #[error("Processing of batch {batch_id} did not finish after {waited:?}")]
    ProcessingTimeout { batch_id: BatchId, waited: Duration },

    /// Wait was cancelled by a batch reset
    #[error("Operation cancelled: {0}")]
    Cancelled(String),

    /// Artifact probe or download errors
    #[error("Artifact error: {0}")]
    Artifact(String),

    /// URL parsing errors
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// HTTP client errors
    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
