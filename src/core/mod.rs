//! Core functionality for the optimizer
//!
//! - `batch`: batch identity, file selection and storage key naming
//! - `upload`: object storage transport
//! - `coordinator`: batch upload orchestration and state machine
//! - `processing`: waiting for the remote transformation
//! - `retrieval`: artifact location and download

pub mod batch;
pub mod coordinator;
pub mod processing;
pub mod retrieval;
pub mod upload;
