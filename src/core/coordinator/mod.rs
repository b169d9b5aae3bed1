//! Batch upload coordinator
//!
//! Sequences the reference upload, fans out product uploads, aggregates
//! failures and advances the batch state machine.

mod coordinator;
mod types;


pub use coordinator::BatchCoordinator;
pub use types::{BatchUploadError, UploadReport};
