//! Push-notification wait: resolve when an external completion callback
//! reports the batch

use super::cancel::CancelSignal;
use super::strategy::ProcessingWaitStrategy;
use crate::core::batch::BatchId;
use crate::utils::error::{OptimizerError, Result};
use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::time::Instant;
use tracing::{debug, info};

/// Receives completion callbacks (webhook handler, queue consumer, ...).
///
/// Completions are remembered until a wait consumes them, so a callback that
/// arrives before the wait starts is not lost.
#[derive(Debug, Clone)]
pub struct CompletionNotifier {
    completed: Arc<watch::Sender<HashSet<BatchId>>>,
}

impl CompletionNotifier {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(HashSet::new());
        Self {
            completed: Arc::new(tx),
        }
    }

    /// Report that processing of `batch_id` finished
    pub fn notify(&self, batch_id: &BatchId) {
        debug!(batch_id = %batch_id, "Completion notification received");
        self.completed.send_modify(|done| {
            done.insert(batch_id.clone());
        });
    }

    pub fn is_completed(&self, batch_id: &BatchId) -> bool {
        self.completed.borrow().contains(batch_id)
    }

    fn consume(&self, batch_id: &BatchId) {
        self.completed.send_if_modified(|done| done.remove(batch_id));
    }

    async fn completed(&self, batch_id: &BatchId) -> Result<()> {
        let mut rx = self.completed.subscribe();
        rx.wait_for(|done| done.contains(batch_id))
            .await
            .map(|_| ())
            .map_err(|_| OptimizerError::cancelled("completion notifier closed"))
    }
}

impl Default for CompletionNotifier {
    fn default() -> Self {
        Self::new()
    }
}

/// Waits for a completion notification, optionally bounded by a timeout
#[derive(Debug, Clone)]
pub struct PushNotificationWait {
    notifier: CompletionNotifier,
    timeout: Option<Duration>,
}

impl PushNotificationWait {
    pub fn new(timeout: Option<Duration>) -> Self {
        Self::with_notifier(CompletionNotifier::new(), timeout)
    }

    pub fn with_notifier(notifier: CompletionNotifier, timeout: Option<Duration>) -> Self {
        Self { notifier, timeout }
    }

    /// Handle to give to whatever receives the completion callbacks
    pub fn notifier(&self) -> CompletionNotifier {
        self.notifier.clone()
    }
}

#[async_trait]
impl ProcessingWaitStrategy for PushNotificationWait {
    async fn await_processing(&self, batch_id: &BatchId, cancel: &CancelSignal) -> Result<()> {
        info!(batch_id = %batch_id, timeout = ?self.timeout, "Waiting for completion notification");
        let start = Instant::now();

        let bounded = async {
            match self.timeout {
                Some(timeout) => {
                    match tokio::time::timeout(timeout, self.notifier.completed(batch_id)).await {
                        Ok(result) => result,
                        Err(_) => Err(OptimizerError::ProcessingTimeout {
                            batch_id: batch_id.clone(),
                            waited: start.elapsed(),
                        }),
                    }
                }
                None => self.notifier.completed(batch_id).await,
            }
        };

        let result = tokio::select! {
            result = bounded => result,
            _ = cancel.cancelled() => Err(OptimizerError::cancelled(format!(
                "processing wait for batch {}",
                batch_id
            ))),
        };

        if result.is_ok() {
            self.notifier.consume(batch_id);
            info!(batch_id = %batch_id, "Processing completion reported");
        }
        result
    }

    fn name(&self) -> &'static str {
        "push_notification"
    }
}
