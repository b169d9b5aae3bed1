//! Artifact retrieval
//!
//! Derives the location of a batch's processed bundle from its identity.

mod download;
mod locator;


pub use download::ArtifactDownloader;
pub use locator::{ArtifactLocation, ArtifactLocator, DownloadId, download_id};
