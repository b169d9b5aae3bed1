//! Custom test assertions

use product_optimizer::{Batch, BatchStatus, BatchUploadError, OptimizerError};

/// Assertions for a batch after a cycle step
pub trait BatchAssertions {
    /// Idle with nothing selected, ready for a new cycle
    fn assert_fresh(&self);

    /// Back to idle with the selection kept for a retry
    fn assert_retryable_with(&self, files: usize);
}

impl BatchAssertions for Batch {
    fn assert_fresh(&self) {
        assert_eq!(self.status(), BatchStatus::Idle);
        assert!(
            !self.has_files(),
            "Expected the selection to be cleared, found {} file(s)",
            self.file_count()
        );
    }

    fn assert_retryable_with(&self, files: usize) {
        assert_eq!(self.status(), BatchStatus::Idle);
        assert_eq!(self.file_count(), files);
    }
}

/// Unwrap the aggregate upload failure or panic with the actual error
pub fn expect_batch_upload_error(err: OptimizerError) -> BatchUploadError {
    match err {
        OptimizerError::BatchUpload(failure) => failure,
        other => panic!("Expected a batch upload error, got: {}", other),
    }
}
