//! Integration tests for product-optimizer-rs
//!
//! These tests drive the public API against a mock HTTP server.

pub mod batch_cycle_tests;
pub mod config_tests;
