//! Processing wait configuration

use super::*;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Which wait strategy to use between upload and retrieval
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ProcessingConfig {
    /// Sleep a fixed time
    FixedDelay(FixedDelayConfig),
    /// Probe the artifact location with exponential backoff
    Polling(PollingConfig),
    /// Wait for a completion callback
    PushNotification(PushNotificationConfig),
}

impl Default for ProcessingConfig {
    fn default() -> Self {
        ProcessingConfig::FixedDelay(FixedDelayConfig::default())
    }
}

/// Fixed delay settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FixedDelayConfig {
    #[serde(default = "default_processing_delay_secs")]
    pub delay_secs: u64,
}

impl Default for FixedDelayConfig {
    fn default() -> Self {
        Self {
            delay_secs: default_processing_delay_secs(),
        }
    }
}

impl FixedDelayConfig {
    pub fn delay(&self) -> Duration {
        Duration::from_secs(self.delay_secs)
    }
}

/// Polling settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PollingConfig {
    /// Delay before the first probe
    #[serde(default = "default_poll_initial_delay_ms")]
    pub initial_delay_ms: u64,
    /// Upper bound for the backoff delay
    #[serde(default = "default_poll_max_delay_ms")]
    pub max_delay_ms: u64,
    /// Backoff factor applied after each unsuccessful probe
    #[serde(default = "default_poll_multiplier")]
    pub multiplier: f64,
    /// Probes before giving up with a processing timeout
    #[serde(default = "default_poll_max_attempts")]
    pub max_attempts: u32,
    /// Timeout of a single probe request
    #[serde(default = "default_probe_timeout_secs")]
    pub probe_timeout_secs: u64,
}

impl Default for PollingConfig {
    fn default() -> Self {
        Self {
            initial_delay_ms: default_poll_initial_delay_ms(),
            max_delay_ms: default_poll_max_delay_ms(),
            multiplier: default_poll_multiplier(),
            max_attempts: default_poll_max_attempts(),
            probe_timeout_secs: default_probe_timeout_secs(),
        }
    }
}

impl PollingConfig {
    pub fn initial_delay(&self) -> Duration {
        Duration::from_millis(self.initial_delay_ms)
    }

    pub fn max_delay(&self) -> Duration {
        Duration::from_millis(self.max_delay_ms)
    }

    pub fn probe_timeout(&self) -> Duration {
        Duration::from_secs(self.probe_timeout_secs)
    }
}

/// Push notification settings
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PushNotificationConfig {
    /// Give up after this many seconds (`null` waits indefinitely)
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl PushNotificationConfig {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}
