//! Configuration validation
//!
//! - `trait_def`: core Validate trait definition
//! - `endpoint`: endpoint URL checks
//! - `validators`: implementations for every configuration section
//! - `tests`: test suite for all validators

mod endpoint;
mod trait_def;
mod validators;

pub use endpoint::validate_endpoint_url;
pub use trait_def::Validate;
