//! Polling wait: probe the artifact location with exponential backoff

use super::cancel::CancelSignal;
use super::probe::ArtifactProbe;
use super::strategy::ProcessingWaitStrategy;
use crate::config::PollingConfig;
use crate::core::batch::BatchId;
use crate::core::retrieval::ArtifactLocator;
use crate::utils::error::{OptimizerError, Result};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;
use tracing::{debug, info, warn};

/// Waits until the artifact exists, giving up after `max_attempts` probes
pub struct PollingWait {
    probe: Arc<dyn ArtifactProbe>,
    locator: ArtifactLocator,
    config: PollingConfig,
}

impl PollingWait {
    pub fn new(probe: Arc<dyn ArtifactProbe>, locator: ArtifactLocator, config: PollingConfig) -> Self {
        Self {
            probe,
            locator,
            config,
        }
    }

    pub fn config(&self) -> &PollingConfig {
        &self.config
    }

    fn next_delay(&self, delay: Duration) -> Duration {
        std::cmp::min(
            Duration::from_millis((delay.as_millis() as f64 * self.config.multiplier) as u64),
            self.config.max_delay(),
        )
    }
}

impl std::fmt::Debug for PollingWait {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PollingWait")
            .field("locator", &self.locator)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl ProcessingWaitStrategy for PollingWait {
    async fn await_processing(&self, batch_id: &BatchId, cancel: &CancelSignal) -> Result<()> {
        let location = self.locator.locate(batch_id)?;
        let start = Instant::now();
        let mut delay = self.config.initial_delay();

        info!(
            batch_id = %batch_id,
            url = %location,
            max_attempts = self.config.max_attempts,
            "Polling for processed artifact"
        );

        for attempt in 1..=self.config.max_attempts {
            tokio::select! {
                _ = tokio::time::sleep(delay) => {}
                _ = cancel.cancelled() => {
                    return Err(OptimizerError::cancelled(format!(
                        "processing wait for batch {}",
                        batch_id
                    )));
                }
            }

            match self.probe.exists(&location).await {
                Ok(true) => {
                    info!(batch_id = %batch_id, attempt, "Artifact available");
                    return Ok(());
                }
                Ok(false) => debug!(batch_id = %batch_id, attempt, "Artifact not available yet"),
                Err(e) => warn!(batch_id = %batch_id, attempt, error = %e, "Artifact probe failed"),
            }

            delay = self.next_delay(delay);
        }

        Err(OptimizerError::ProcessingTimeout {
            batch_id: batch_id.clone(),
            waited: start.elapsed(),
        })
    }

    fn name(&self) -> &'static str {
        "polling"
    }
}
