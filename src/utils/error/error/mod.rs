//! Error handling for the optimizer
//!
//! This module defines the crate-wide error type.

#![allow(missing_docs)]

mod helpers;
mod types;

pub use types::{OptimizerError, Result};
