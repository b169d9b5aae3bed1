//! Configuration management for the optimizer
//!
//! This module handles loading, validation, and management of all optimizer configuration.

pub mod models;
pub mod validation;

pub use models::*;
pub use validation::Validate;

use crate::utils::error::{OptimizerError, Result};
use std::path::Path;
use tracing::{debug, info};

/// Main configuration struct for the optimizer
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Config {
    /// Optimizer configuration
    pub optimizer: OptimizerConfig,
}

impl Config {
    /// Load configuration from file
    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading configuration from: {:?}", path);

        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| OptimizerError::Config(format!("Failed to read config file: {}", e)))?;

        let config = Self::from_yaml(&content)?;

        debug!("Configuration loaded successfully");
        Ok(config)
    }

    /// Parse and validate a YAML document
    pub fn from_yaml(content: &str) -> Result<Self> {
        let optimizer: OptimizerConfig = serde_yaml::from_str(content)
            .map_err(|e| OptimizerError::Config(format!("Failed to parse config: {}", e)))?;

        let config = Self { optimizer };
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        info!("Loading configuration from environment variables");

        let optimizer = OptimizerConfig::from_env()?;
        let config = Self { optimizer };

        config.validate()?;
        Ok(config)
    }

    /// Load the file when one is given, otherwise defaults, then overlay the
    /// process environment.
    pub async fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path).await?,
            None => Self::default(),
        };
        config.apply_env_overrides(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Overlay environment values and re-validate
    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        self.optimizer.apply_env_overrides(lookup)?;
        self.validate()
    }

    /// Get endpoint configuration
    pub fn endpoints(&self) -> &EndpointsConfig {
        &self.optimizer.endpoints
    }

    /// Get upload configuration
    pub fn upload(&self) -> &UploadConfig {
        &self.optimizer.upload
    }

    /// Get processing wait configuration
    pub fn processing(&self) -> &ProcessingConfig {
        &self.optimizer.processing
    }

    /// Get logging configuration
    pub fn logging(&self) -> &LoggingConfig {
        &self.optimizer.logging
    }

    /// Validate the entire configuration
    pub fn validate(&self) -> Result<()> {
        debug!("Validating configuration");

        self.optimizer
            .endpoints
            .validate()
            .map_err(|e| OptimizerError::Config(format!("Endpoints config error: {}", e)))?;

        self.optimizer
            .upload
            .validate()
            .map_err(|e| OptimizerError::Config(format!("Upload config error: {}", e)))?;

        self.optimizer
            .processing
            .validate()
            .map_err(|e| OptimizerError::Config(format!("Processing config error: {}", e)))?;

        self.optimizer
            .logging
            .validate()
            .map_err(|e| OptimizerError::Config(format!("Logging config error: {}", e)))?;

        debug!("Configuration validation completed");
        Ok(())
    }

    /// Convert to JSON string
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(&self.optimizer).map_err(|e| {
            OptimizerError::Config(format!("Failed to serialize config to JSON: {}", e))
        })
    }

    /// Convert to YAML string
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(&self.optimizer).map_err(|e| {
            OptimizerError::Config(format!("Failed to serialize config to YAML: {}", e))
        })
    }
}
