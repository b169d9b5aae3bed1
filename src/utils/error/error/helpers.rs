//! Helper functions for creating specific error types

use super::types::OptimizerError;
use crate::core::batch::BatchStatus;

/// Helper functions for creating specific errors
impl OptimizerError {
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config(message.into())
    }

    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation(message.into())
    }

    pub fn cancelled<S: Into<String>>(message: S) -> Self {
        Self::Cancelled(message.into())
    }

    pub fn artifact<S: Into<String>>(message: S) -> Self {
        Self::Artifact(message.into())
    }

    pub fn invalid_state(operation: &'static str, status: BatchStatus) -> Self {
        Self::InvalidState { operation, status }
    }
}

impl OptimizerError {
    /// Whether re-running the failed operation from `Idle` may succeed
    /// without the caller changing anything.
    pub fn is_retryable(&self) -> bool {
        match self {
            OptimizerError::Upload(err) => err.is_retryable(),
            OptimizerError::BatchUpload(err) => {
                !err.errors.is_empty() && err.errors.iter().all(|e| e.is_retryable())
            }
            OptimizerError::ProcessingTimeout { .. } => true,
            OptimizerError::HttpClient(err) => err.is_timeout() || err.is_connect(),
            OptimizerError::Artifact(_) => true,
            OptimizerError::Config(_)
            | OptimizerError::Validation(_)
            | OptimizerError::NoFilesSelected
            | OptimizerError::InvalidState { .. }
            | OptimizerError::Cancelled(_)
            | OptimizerError::InvalidUrl(_)
            | OptimizerError::Serialization(_)
            | OptimizerError::Yaml(_)
            | OptimizerError::Io(_) => false,
        }
    }
}
