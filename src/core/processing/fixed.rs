//! Fixed-delay wait: sleep, then assume the artifact exists

use super::cancel::CancelSignal;
use super::strategy::ProcessingWaitStrategy;
use crate::core::batch::BatchId;
use crate::utils::error::{OptimizerError, Result};
use async_trait::async_trait;
use std::time::Duration;
use tracing::info;

/// Blind timer. Nothing verifies that processing actually finished.
#[derive(Debug, Clone)]
pub struct FixedDelayWait {
    delay: Duration,
}

impl FixedDelayWait {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }
}

#[async_trait]
impl ProcessingWaitStrategy for FixedDelayWait {
    async fn await_processing(&self, batch_id: &BatchId, cancel: &CancelSignal) -> Result<()> {
        info!(batch_id = %batch_id, delay = ?self.delay, "Waiting a fixed delay for processing");

        tokio::select! {
            _ = tokio::time::sleep(self.delay) => Ok(()),
            _ = cancel.cancelled() => Err(OptimizerError::cancelled(format!(
                "processing wait for batch {}",
                batch_id
            ))),
        }
    }

    fn name(&self) -> &'static str {
        "fixed_delay"
    }
}
