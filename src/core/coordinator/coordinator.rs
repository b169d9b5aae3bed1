//! Batch coordinator implementation

use super::types::{BatchUploadError, UploadReport};
use crate::config::{Config, ProcessingConfig, UploadConfig};
use crate::core::batch::{Batch, BatchStatus, StorageKey};
use crate::core::processing::{
    CompletionNotifier, HttpArtifactProbe, ProcessingWait, ProcessingWaitStrategy,
};
use crate::core::retrieval::{ArtifactLocation, ArtifactLocator};
use crate::core::upload::{HttpUploadTransport, UploadError, UploadTask, UploadTransport};
use crate::utils::error::{OptimizerError, Result};
use crate::utils::{format_bytes, format_duration};
use futures::stream::{self, StreamExt};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, error, info, warn};

/// Drives one batch through upload, processing wait and retrieval.
///
/// Holds no per-batch state; the [`Batch`] is passed in by the caller.
#[derive(Clone)]
pub struct BatchCoordinator {
    transport: Arc<dyn UploadTransport>,
    wait: Arc<dyn ProcessingWaitStrategy>,
    locator: ArtifactLocator,
    config: UploadConfig,
    notifier: Option<CompletionNotifier>,
}

impl std::fmt::Debug for BatchCoordinator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BatchCoordinator")
            .field("wait", &self.wait.name())
            .field("locator", &self.locator)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl BatchCoordinator {
    pub fn new(
        transport: Arc<dyn UploadTransport>,
        wait: Arc<dyn ProcessingWaitStrategy>,
        locator: ArtifactLocator,
        config: UploadConfig,
    ) -> Self {
        Self {
            transport,
            wait,
            locator,
            config,
            notifier: None,
        }
    }

    /// Attach the notifier that completes push-notification waits
    pub fn with_notifier(mut self, notifier: CompletionNotifier) -> Self {
        self.notifier = Some(notifier);
        self
    }

    /// Wire HTTP transport, artifact locator and the configured wait strategy
    pub fn from_config(config: &Config) -> Result<Self> {
        let transport = HttpUploadTransport::from_config(config.endpoints(), config.upload())?;
        let locator = ArtifactLocator::parse(&config.endpoints().artifact_base_url)?;

        let probe_timeout = match config.processing() {
            ProcessingConfig::Polling(polling) => Some(polling.probe_timeout()),
            _ => None,
        };
        let probe = Arc::new(HttpArtifactProbe::new(probe_timeout)?);
        let wait = ProcessingWait::from_config(config.processing(), &locator, probe);
        let notifier = wait.notifier();

        info!(
            upload_base_url = %transport.base_url(),
            artifact_base_url = %locator.base_url(),
            max_concurrent_uploads = config.upload().max_concurrent_uploads,
            "Batch coordinator configured"
        );

        let mut coordinator = Self::new(
            Arc::new(transport),
            Arc::new(wait),
            locator,
            config.upload().clone(),
        );
        coordinator.notifier = notifier;
        Ok(coordinator)
    }

    pub fn locator(&self) -> &ArtifactLocator {
        &self.locator
    }

    /// Completion handle when waits are resolved by push notification
    pub fn notifier(&self) -> Option<&CompletionNotifier> {
        self.notifier.as_ref()
    }

    /// Upload every selected file of `batch`.
    ///
    /// The reference goes first and must succeed before any product upload
    /// starts. Products then run concurrently, capped by
    /// `max_concurrent_uploads`. On full success the batch is `Processing`;
    /// on any failure it is back to `Idle` with its selection intact.
    pub async fn upload_all(&self, batch: &mut Batch) -> Result<UploadReport> {
        if !batch.status().is_idle() {
            return Err(OptimizerError::invalid_state(
                "start an upload",
                batch.status(),
            ));
        }
        if !batch.has_files() {
            return Err(OptimizerError::NoFilesSelected);
        }

        let (reference, products) = batch.upload_tasks(&self.config.default_content_type)?;
        batch.transition(BatchStatus::Uploading)?;

        let start = Instant::now();
        info!(
            batch_id = %batch.id(),
            files = batch.file_count(),
            size = %format_bytes(batch.total_bytes()),
            "Batch upload started"
        );

        let mut keys = Vec::with_capacity(batch.file_count());
        let mut total_bytes = 0u64;

        if let Some(task) = reference {
            let size = task.body.len() as u64;
            match self.put(task).await {
                Ok(key) => {
                    keys.push(key);
                    total_bytes += size;
                }
                Err(err) => {
                    let mut failure = BatchUploadError {
                        skipped_keys: products.into_iter().map(|t| t.key).collect(),
                        ..BatchUploadError::default()
                    };
                    failure.push_failure(err);
                    return self.abort(batch, failure).await;
                }
            }
        }

        let concurrency = self.config.max_concurrent_uploads.max(1);
        let mut outcomes: Vec<(usize, u64, std::result::Result<StorageKey, UploadError>)> =
            stream::iter(products.into_iter().enumerate())
                .map(|(index, task)| async move {
                    let size = task.body.len() as u64;
                    (index, size, self.put(task).await)
                })
                .buffer_unordered(concurrency)
                .collect()
                .await;
        outcomes.sort_by_key(|(index, _, _)| *index);

        let mut failure = BatchUploadError::default();
        for (_, size, outcome) in outcomes {
            match outcome {
                Ok(key) => {
                    keys.push(key);
                    total_bytes += size;
                }
                Err(err) => failure.push_failure(err),
            }
        }

        if failure.has_failures() {
            failure.succeeded_keys = keys;
            return self.abort(batch, failure).await;
        }

        batch.transition(BatchStatus::Processing)?;
        let duration = start.elapsed();
        info!(
            batch_id = %batch.id(),
            uploaded = keys.len(),
            elapsed = %format_duration(duration),
            "Batch upload completed"
        );

        Ok(UploadReport {
            batch_id: batch.id().clone(),
            keys,
            total_bytes,
            duration,
        })
    }

    /// Wait for remote processing of an uploaded batch.
    ///
    /// The wait strategy runs exactly once. Completion moves the batch to
    /// `Ready`. A timeout returns it to `Idle` with its files kept so the
    /// upload can be retried; a cancellation resets it.
    pub async fn await_processing(&self, batch: &mut Batch) -> Result<()> {
        if batch.status() != BatchStatus::Processing {
            return Err(OptimizerError::invalid_state(
                "await processing",
                batch.status(),
            ));
        }

        let cancel = batch.cancel_signal();
        info!(batch_id = %batch.id(), strategy = self.wait.name(), "Waiting for processing");

        match self.wait.await_processing(batch.id(), &cancel).await {
            Ok(()) => {
                batch.transition(BatchStatus::Ready)?;
                info!(batch_id = %batch.id(), "Batch ready for retrieval");
                Ok(())
            }
            Err(err @ OptimizerError::Cancelled(_)) => {
                warn!(batch_id = %batch.id(), "Processing wait cancelled");
                batch.reset();
                Err(err)
            }
            Err(err) => {
                error!(batch_id = %batch.id(), error = %err, "Processing wait failed");
                batch.transition(BatchStatus::Idle)?;
                Err(err)
            }
        }
    }

    /// Upload then wait for processing
    pub async fn run(&self, batch: &mut Batch) -> Result<UploadReport> {
        let report = self.upload_all(batch).await?;
        self.await_processing(batch).await?;
        Ok(report)
    }

    /// Location of the processed bundle of a `Ready` batch.
    ///
    /// Resets the batch for a new cycle. The object's existence is not
    /// checked; fetching it is up to the caller.
    pub fn retrieve(&self, batch: &mut Batch) -> Result<ArtifactLocation> {
        if batch.status() != BatchStatus::Ready {
            return Err(OptimizerError::invalid_state(
                "retrieve the artifact",
                batch.status(),
            ));
        }

        let location = self.locator.locate(batch.id())?;
        info!(batch_id = %batch.id(), location = %location, "Artifact location resolved");
        batch.reset();
        Ok(location)
    }

    /// Cancel any pending wait and return the batch to a fresh `Idle` state
    pub fn reset(&self, batch: &mut Batch) {
        batch.reset();
    }

    async fn put(&self, task: UploadTask) -> std::result::Result<StorageKey, UploadError> {
        debug!(key = %task.key, size = task.body.len(), content_type = %task.content_type, "Uploading");
        match self
            .transport
            .put_object(&task.key, task.body, &task.content_type)
            .await
        {
            Ok(()) => Ok(task.key),
            Err(err) => {
                warn!(key = %err.key, error = %err.cause, retryable = err.is_retryable(), "Upload failed");
                Err(err)
            }
        }
    }

    async fn abort(
        &self,
        batch: &mut Batch,
        mut failure: BatchUploadError,
    ) -> Result<UploadReport> {
        if self.config.cleanup_on_failure && !failure.succeeded_keys.is_empty() {
            failure.cleanup_failed_keys = self.cleanup(&failure.succeeded_keys).await;
        }

        batch.transition(BatchStatus::Idle)?;
        error!(
            batch_id = %batch.id(),
            failed = failure.failed_keys.len(),
            skipped = failure.skipped_keys.len(),
            succeeded = failure.succeeded_keys.len(),
            "Batch upload aborted"
        );
        Err(OptimizerError::BatchUpload(failure))
    }

    /// Delete already-written objects; returns the keys that could not be removed
    async fn cleanup(&self, keys: &[StorageKey]) -> Vec<StorageKey> {
        let concurrency = self.config.max_concurrent_uploads.max(1);
        let mut failed: Vec<(usize, StorageKey)> = stream::iter(keys.iter().enumerate())
            .map(|(index, key)| async move {
                match self.transport.delete_object(key).await {
                    Ok(()) => None,
                    Err(err) => {
                        warn!(key = %key, error = %err.cause, "Cleanup delete failed");
                        Some((index, key.clone()))
                    }
                }
            })
            .buffer_unordered(concurrency)
            .filter_map(|outcome| async move { outcome })
            .collect()
            .await;
        failed.sort_by_key(|(index, _)| *index);
        failed.into_iter().map(|(_, key)| key).collect()
    }
}
