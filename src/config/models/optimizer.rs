//! Top-level optimizer configuration

#![allow(missing_docs)]

use super::*;
use crate::utils::error::{OptimizerError, Result};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

pub const ENV_UPLOAD_BASE_URL: &str = "OPTIMIZER_UPLOAD_BASE_URL";
pub const ENV_ARTIFACT_BASE_URL: &str = "OPTIMIZER_ARTIFACT_BASE_URL";
pub const ENV_MAX_CONCURRENT_UPLOADS: &str = "OPTIMIZER_MAX_CONCURRENT_UPLOADS";
pub const ENV_UPLOAD_TIMEOUT_SECS: &str = "OPTIMIZER_UPLOAD_TIMEOUT_SECS";
pub const ENV_PROCESSING_DELAY_SECS: &str = "OPTIMIZER_PROCESSING_DELAY_SECS";
pub const ENV_LOG_LEVEL: &str = "OPTIMIZER_LOG_LEVEL";

/// Main optimizer configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct OptimizerConfig {
    #[serde(default)]
    pub endpoints: EndpointsConfig,
    #[serde(default)]
    pub upload: UploadConfig,
    #[serde(default)]
    pub processing: ProcessingConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl OptimizerConfig {
    /// Defaults overlaid with the process environment
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();
        config.apply_env_overrides(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Overlay values found through `lookup` onto this configuration.
    ///
    /// `OPTIMIZER_PROCESSING_DELAY_SECS` switches the strategy to a fixed delay.
    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(ENV_UPLOAD_BASE_URL) {
            self.endpoints.upload_base_url = url;
        }
        if let Some(url) = lookup(ENV_ARTIFACT_BASE_URL) {
            self.endpoints.artifact_base_url = url;
        }
        if let Some(raw) = lookup(ENV_MAX_CONCURRENT_UPLOADS) {
            self.upload.max_concurrent_uploads = parse_env(ENV_MAX_CONCURRENT_UPLOADS, &raw)?;
        }
        if let Some(raw) = lookup(ENV_UPLOAD_TIMEOUT_SECS) {
            self.upload.timeout_secs = Some(parse_env(ENV_UPLOAD_TIMEOUT_SECS, &raw)?);
        }
        if let Some(raw) = lookup(ENV_PROCESSING_DELAY_SECS) {
            self.processing = ProcessingConfig::FixedDelay(FixedDelayConfig {
                delay_secs: parse_env(ENV_PROCESSING_DELAY_SECS, &raw)?,
            });
        }
        if let Some(level) = lookup(ENV_LOG_LEVEL) {
            self.logging.level = level;
        }
        Ok(())
    }
}

fn parse_env<T>(name: &str, raw: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim()
        .parse()
        .map_err(|e| OptimizerError::Config(format!("Invalid value for {}: {}", name, e)))
}
