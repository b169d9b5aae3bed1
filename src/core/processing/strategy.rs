//! Processing wait capability and its configured dispatch

use super::cancel::CancelSignal;
use super::fixed::FixedDelayWait;
use super::polling::PollingWait;
use super::probe::ArtifactProbe;
use super::push::{CompletionNotifier, PushNotificationWait};
use crate::config::ProcessingConfig;
use crate::core::batch::BatchId;
use crate::core::retrieval::ArtifactLocator;
use crate::utils::error::Result;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::info;

/// Models the delay between "uploads complete" and "artifact available".
///
/// Invoked once per successful batch upload; its completion is the only
/// trigger for `Ready`.
#[async_trait]
pub trait ProcessingWaitStrategy: Send + Sync {
    /// Resolve when the artifact for `batch_id` is expected to exist.
    ///
    /// Must return `Cancelled` promptly once `cancel` fires.
    async fn await_processing(&self, batch_id: &BatchId, cancel: &CancelSignal) -> Result<()>;

    /// Short name for logs
    fn name(&self) -> &'static str;
}

/// Wait strategy selected from configuration
#[derive(Debug)]
pub enum ProcessingWait {
    /// Blind timer
    FixedDelay(FixedDelayWait),
    /// Probe the artifact location with backoff
    Polling(PollingWait),
    /// Completion callback
    PushNotification(PushNotificationWait),
}

impl ProcessingWait {
    /// Build the configured strategy.
    ///
    /// `probe` is only used by the polling strategy.
    pub fn from_config(
        config: &ProcessingConfig,
        locator: &ArtifactLocator,
        probe: Arc<dyn ArtifactProbe>,
    ) -> Self {
        let wait = match config {
            ProcessingConfig::FixedDelay(fixed) => {
                ProcessingWait::FixedDelay(FixedDelayWait::new(fixed.delay()))
            }
            ProcessingConfig::Polling(polling) => ProcessingWait::Polling(PollingWait::new(
                probe,
                locator.clone(),
                polling.clone(),
            )),
            ProcessingConfig::PushNotification(push) => {
                ProcessingWait::PushNotification(PushNotificationWait::new(push.timeout()))
            }
        };

        info!("Processing wait strategy: {}", wait.name());
        wait
    }

    /// Completion handle when the push-notification strategy is active
    pub fn notifier(&self) -> Option<CompletionNotifier> {
        match self {
            ProcessingWait::PushNotification(push) => Some(push.notifier()),
            _ => None,
        }
    }
}

#[async_trait]
impl ProcessingWaitStrategy for ProcessingWait {
    async fn await_processing(&self, batch_id: &BatchId, cancel: &CancelSignal) -> Result<()> {
        match self {
            ProcessingWait::FixedDelay(wait) => wait.await_processing(batch_id, cancel).await,
            ProcessingWait::Polling(wait) => wait.await_processing(batch_id, cancel).await,
            ProcessingWait::PushNotification(wait) => wait.await_processing(batch_id, cancel).await,
        }
    }

    fn name(&self) -> &'static str {
        match self {
            ProcessingWait::FixedDelay(wait) => wait.name(),
            ProcessingWait::Polling(wait) => wait.name(),
            ProcessingWait::PushNotification(wait) => wait.name(),
        }
    }
}
