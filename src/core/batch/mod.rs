//! Batch model
//!
//! A batch is one reference image plus zero or more product images, identified
//! by a single id for the whole session.

mod identity;
mod naming;
mod types;


pub use identity::{BatchId, IdentityProvider, UuidIdentityProvider};
pub use naming::{FileRole, StorageKey, derive_key};
pub use types::{Batch, BatchStatus, FileHandle};
