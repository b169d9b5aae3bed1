//! Batch types and data structures

use super::identity::{BatchId, IdentityProvider, UuidIdentityProvider};
use super::naming::{FileRole, derive_key};
use crate::core::processing::CancelSignal;
use crate::core::upload::UploadTask;
use crate::utils::error::{OptimizerError, Result};
use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use tracing::debug;

/// Batch lifecycle status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BatchStatus {
    /// Files may be selected; nothing in flight
    #[default]
    Idle,
    /// Uploads in progress
    Uploading,
    /// Uploads done, waiting for the remote artifact
    Processing,
    /// Artifact expected to be available
    Ready,
}

impl BatchStatus {
    /// Whether moving from `self` to `next` is a legal transition.
    ///
    /// Forward moves only, plus the fallbacks to `Idle` after a failed upload,
    /// a failed or cancelled wait, and a retrieval.
    pub fn can_transition_to(self, next: BatchStatus) -> bool {
        use BatchStatus::*;
        matches!(
            (self, next),
            (Idle, Uploading)
                | (Uploading, Processing)
                | (Uploading, Idle)
                | (Processing, Ready)
                | (Processing, Idle)
                | (Ready, Idle)
        )
    }

    pub fn is_idle(self) -> bool {
        self == BatchStatus::Idle
    }
}

impl fmt::Display for BatchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            BatchStatus::Idle => "idle",
            BatchStatus::Uploading => "uploading",
            BatchStatus::Processing => "processing",
            BatchStatus::Ready => "ready",
        };
        f.write_str(s)
    }
}

/// A selected file: payload, original name and declared MIME type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileHandle {
    name: String,
    content_type: Option<String>,
    bytes: Bytes,
}

impl FileHandle {
    /// Create a handle without a declared MIME type
    pub fn new<N: Into<String>, B: Into<Bytes>>(name: N, bytes: B) -> Self {
        Self {
            name: name.into(),
            content_type: None,
            bytes: bytes.into(),
        }
    }

    /// Declare the MIME type
    pub fn with_content_type<S: Into<String>>(mut self, content_type: S) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    /// Load a file from disk, guessing its MIME type from the extension
    pub async fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| {
                OptimizerError::validation(format!("Path has no usable file name: {:?}", path))
            })?
            .to_string();

        let bytes = tokio::fs::read(path).await?;
        debug!(path = ?path, size = bytes.len(), "Loaded file");

        let mut handle = Self::new(name, bytes);
        handle.content_type = mime_guess::from_path(path)
            .first()
            .map(|mime| mime.essence_str().to_string());
        Ok(handle)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn content_type(&self) -> Option<&str> {
        self.content_type.as_deref()
    }

    pub fn bytes(&self) -> &Bytes {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Whether the declared (or guessed) type is an image type
    pub fn is_image(&self) -> bool {
        match &self.content_type {
            Some(content_type) => content_type.starts_with("image/"),
            None => mime_guess::from_path(&self.name)
                .first()
                .is_some_and(|mime| mime.type_() == mime_guess::mime::IMAGE),
        }
    }
}

/// One user-initiated unit of work
#[derive(Debug)]
pub struct Batch {
    id: BatchId,
    reference: Option<FileHandle>,
    products: Vec<FileHandle>,
    status: BatchStatus,
    created_at: DateTime<Utc>,
    cancel: CancelSignal,
}

impl Batch {
    /// Start a session with a random identity
    pub fn new() -> Self {
        Self::with_provider(&UuidIdentityProvider)
    }

    /// Start a session with an identity from `provider`
    pub fn with_provider(provider: &dyn IdentityProvider) -> Self {
        Self::with_id(provider.new_batch_id())
    }

    /// Start a session with a known identity
    pub fn with_id(id: BatchId) -> Self {
        Self {
            id,
            reference: None,
            products: Vec::new(),
            status: BatchStatus::Idle,
            created_at: Utc::now(),
            cancel: CancelSignal::new(),
        }
    }

    pub fn id(&self) -> &BatchId {
        &self.id
    }

    pub fn status(&self) -> BatchStatus {
        self.status
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn reference(&self) -> Option<&FileHandle> {
        self.reference.as_ref()
    }

    pub fn products(&self) -> &[FileHandle] {
        &self.products
    }

    pub fn has_files(&self) -> bool {
        self.reference.is_some() || !self.products.is_empty()
    }

    pub fn file_count(&self) -> usize {
        usize::from(self.reference.is_some()) + self.products.len()
    }

    pub fn total_bytes(&self) -> u64 {
        self.reference
            .iter()
            .chain(self.products.iter())
            .map(|f| f.len() as u64)
            .sum()
    }

    /// Handle that cancels an in-progress processing wait for this batch
    pub fn cancel_signal(&self) -> CancelSignal {
        self.cancel.clone()
    }

    /// Select the reference image, replacing any previous one
    pub fn select_reference(&mut self, file: FileHandle) -> Result<()> {
        self.ensure_selectable("select a reference image")?;
        debug!(batch_id = %self.id, name = file.name(), "Reference selected");
        self.reference = Some(file);
        Ok(())
    }

    /// Select the product images, replacing the previous list.
    ///
    /// An empty selection keeps the previous list.
    pub fn select_products(&mut self, files: Vec<FileHandle>) -> Result<()> {
        self.ensure_selectable("select product images")?;
        if files.is_empty() {
            debug!(batch_id = %self.id, "Empty product selection ignored");
            return Ok(());
        }
        debug!(batch_id = %self.id, count = files.len(), "Products selected");
        self.products = files;
        Ok(())
    }

    /// Drop every selected file
    pub fn clear_selection(&mut self) -> Result<()> {
        self.ensure_selectable("clear the selection")?;
        self.reference = None;
        self.products.clear();
        Ok(())
    }

    fn ensure_selectable(&self, operation: &'static str) -> Result<()> {
        if self.status.is_idle() {
            Ok(())
        } else {
            Err(OptimizerError::invalid_state(operation, self.status))
        }
    }

    /// Move to `next`, rejecting illegal transitions
    pub(crate) fn transition(&mut self, next: BatchStatus) -> Result<()> {
        if !self.status.can_transition_to(next) {
            return Err(OptimizerError::invalid_state(
                match next {
                    BatchStatus::Idle => "return to idle",
                    BatchStatus::Uploading => "start uploading",
                    BatchStatus::Processing => "start processing",
                    BatchStatus::Ready => "mark ready",
                },
                self.status,
            ));
        }

        debug!(batch_id = %self.id, from = %self.status, to = %next, "Batch transition");
        self.status = next;
        if next.is_idle() && self.cancel.is_cancelled() {
            self.cancel = CancelSignal::new();
        }
        Ok(())
    }

    /// Cancel pending waits, clear the selection and return to `Idle`.
    ///
    /// The batch id is kept.
    pub(crate) fn reset(&mut self) {
        self.cancel.cancel();
        self.cancel = CancelSignal::new();
        self.reference = None;
        self.products.clear();
        self.status = BatchStatus::Idle;
        debug!(batch_id = %self.id, "Batch reset");
    }

    /// Build the reference task and the product tasks, in selection order
    pub(crate) fn upload_tasks(
        &self,
        default_content_type: &str,
    ) -> Result<(Option<UploadTask>, Vec<UploadTask>)> {
        let reference = self
            .reference
            .as_ref()
            .map(|file| self.task_for(file, FileRole::Reference, default_content_type))
            .transpose()?;

        let products = self
            .products
            .iter()
            .enumerate()
            .map(|(index, file)| {
                self.task_for(
                    file,
                    FileRole::Product { ordinal: index + 1 },
                    default_content_type,
                )
            })
            .collect::<Result<Vec<_>>>()?;

        Ok((reference, products))
    }

    fn task_for(
        &self,
        file: &FileHandle,
        role: FileRole,
        default_content_type: &str,
    ) -> Result<UploadTask> {
        Ok(UploadTask {
            key: derive_key(&self.id, role, file.name())?,
            body: file.bytes().clone(),
            content_type: file
                .content_type()
                .unwrap_or(default_content_type)
                .to_string(),
        })
    }
}

impl Default for Batch {
    fn default() -> Self {
        Self::new()
    }
}
