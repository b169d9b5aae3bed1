//! Configuration data models
//!
//! This module defines all configuration structures used by the optimizer.

#![allow(missing_docs)]

pub mod endpoints;
pub mod logging;
pub mod optimizer;
pub mod processing;
pub mod upload;

// Re-export all configuration types
pub use endpoints::*;
pub use logging::*;
pub use optimizer::*;
pub use processing::*;
pub use upload::*;

/// Default upload endpoint
pub fn default_upload_base_url() -> String {
    "http://localhost:9000/upload".to_string()
}

/// Default artifact endpoint
pub fn default_artifact_base_url() -> String {
    "http://localhost:9000/artifacts".to_string()
}

/// Default cap on concurrent product uploads
pub fn default_max_concurrent_uploads() -> usize {
    8
}

/// Default per-request upload timeout in seconds
pub fn default_upload_timeout_secs() -> Option<u64> {
    Some(300)
}

pub fn default_content_type() -> String {
    "application/octet-stream".to_string()
}

/// Default fixed processing delay in seconds
pub fn default_processing_delay_secs() -> u64 {
    10
}

pub fn default_poll_initial_delay_ms() -> u64 {
    2_000
}

pub fn default_poll_max_delay_ms() -> u64 {
    30_000
}

pub fn default_poll_multiplier() -> f64 {
    2.0
}

pub fn default_poll_max_attempts() -> u32 {
    10
}

pub fn default_probe_timeout_secs() -> u64 {
    10
}

pub fn default_log_level() -> String {
    "info".to_string()
}
