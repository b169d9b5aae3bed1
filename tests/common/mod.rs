//! Common test utilities for product-optimizer-rs
//!
//! - Test fixtures (batches, image payloads, configuration)
//! - A mock object store and artifact host
//! - Custom assertions

pub mod assertions;
pub mod fixtures;
pub mod store;

pub use fixtures::{BatchFactory, ConfigFactory};
pub use store::MockStore;
