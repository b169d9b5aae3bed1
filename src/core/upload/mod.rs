//! Upload transport
//!
//! Performs one idempotent "put object" per file against a remote endpoint.

mod transport;
mod types;


pub use transport::{HttpUploadTransport, UploadTransport, object_url};
pub use types::{UploadError, UploadFailure, UploadTask};
