//! Configuration validators

use super::endpoint::validate_endpoint_url;
use super::trait_def::Validate;
use crate::config::models::*;
use tracing::debug;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

impl Validate for OptimizerConfig {
    fn validate(&self) -> Result<(), String> {
        debug!("Validating optimizer configuration");

        self.endpoints.validate()?;
        self.upload.validate()?;
        self.processing.validate()?;
        self.logging.validate()?;

        debug!("Optimizer configuration validation completed");
        Ok(())
    }
}

impl Validate for EndpointsConfig {
    fn validate(&self) -> Result<(), String> {
        validate_endpoint_url(&self.upload_base_url, "Upload base URL")?;
        validate_endpoint_url(&self.artifact_base_url, "Artifact base URL")?;
        Ok(())
    }
}

impl Validate for UploadConfig {
    fn validate(&self) -> Result<(), String> {
        debug!("Validating upload configuration");

        if self.max_concurrent_uploads == 0 {
            return Err("max_concurrent_uploads must be greater than 0".to_string());
        }

        if self.timeout_secs == Some(0) {
            return Err("Upload timeout must be greater than 0 seconds".to_string());
        }

        if self.default_content_type.trim().is_empty() {
            return Err("default_content_type cannot be empty".to_string());
        }

        if !self.default_content_type.contains('/') {
            return Err(format!(
                "default_content_type '{}' is not a MIME type",
                self.default_content_type
            ));
        }

        Ok(())
    }
}

impl Validate for ProcessingConfig {
    fn validate(&self) -> Result<(), String> {
        match self {
            ProcessingConfig::FixedDelay(_) => Ok(()),
            ProcessingConfig::Polling(polling) => polling.validate(),
            ProcessingConfig::PushNotification(push) => {
                if push.timeout_secs == Some(0) {
                    return Err("Push notification timeout must be greater than 0".to_string());
                }
                Ok(())
            }
        }
    }
}

impl Validate for PollingConfig {
    fn validate(&self) -> Result<(), String> {
        debug!("Validating polling configuration");

        if self.initial_delay_ms == 0 {
            return Err("Polling initial_delay_ms must be greater than 0".to_string());
        }

        if self.max_delay_ms < self.initial_delay_ms {
            return Err("Polling max_delay_ms must be >= initial_delay_ms".to_string());
        }

        if !self.multiplier.is_finite() || self.multiplier < 1.0 {
            return Err(format!(
                "Polling multiplier must be >= 1.0, got {}",
                self.multiplier
            ));
        }

        if self.max_attempts == 0 {
            return Err("Polling max_attempts must be greater than 0".to_string());
        }

        if self.probe_timeout_secs == 0 {
            return Err("Polling probe_timeout_secs must be greater than 0".to_string());
        }

        Ok(())
    }
}

impl Validate for LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        let level = self.level.to_ascii_lowercase();
        if !LOG_LEVELS.contains(&level.as_str()) {
            return Err(format!(
                "Invalid log level '{}', expected one of: {}",
                self.level,
                LOG_LEVELS.join(", ")
            ));
        }
        Ok(())
    }
}
