//! # Product Optimizer
//!
//! Client-side orchestration for a serverless product image optimizer: upload
//! a reference image and a batch of product images to object storage under
//! deterministic keys, wait for the remote transformation, then resolve the
//! location of the processed bundle.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use product_optimizer::{Batch, BatchCoordinator, Config, FileHandle};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::from_file("config/optimizer.yaml").await?;
//!     let coordinator = BatchCoordinator::from_config(&config)?;
//!
//!     let mut batch = Batch::new();
//!     batch.select_reference(FileHandle::from_path("logo.png").await?)?;
//!     batch.select_products(vec![
//!         FileHandle::from_path("a.png").await?,
//!         FileHandle::from_path("b.png").await?,
//!     ])?;
//!
//!     coordinator.run(&mut batch).await?;
//!     let location = coordinator.retrieve(&mut batch)?;
//!     println!("Bundle: {}", location);
//!     Ok(())
//! }
//! ```

#![allow(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_inception)]

pub mod config;
pub mod core;
pub mod utils;

// Re-export main types
pub use config::Config;
pub use utils::error::{OptimizerError, Result};

pub use crate::core::batch::{
    Batch, BatchId, BatchStatus, FileHandle, FileRole, IdentityProvider, StorageKey,
    UuidIdentityProvider, derive_key,
};
pub use crate::core::coordinator::{BatchCoordinator, BatchUploadError, UploadReport};
pub use crate::core::processing::{
    ArtifactProbe, CancelSignal, CompletionNotifier, HttpArtifactProbe, ProcessingWait,
    ProcessingWaitStrategy,
};
pub use crate::core::retrieval::{
    ArtifactDownloader, ArtifactLocation, ArtifactLocator, DownloadId, download_id,
};
pub use crate::core::upload::{
    HttpUploadTransport, UploadError, UploadFailure, UploadTask, UploadTransport,
};

// Version information
/// Current version of the crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
/// Name of the crate
pub const NAME: &str = env!("CARGO_PKG_NAME");
/// Description of the crate
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");

/// Build metadata captured by `build.rs`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildInfo {
    /// Version number
    pub version: &'static str,
    /// Unix timestamp of the build
    pub build_time: &'static str,
    /// Git commit hash
    pub git_hash: &'static str,
    /// Rust version
    pub rust_version: &'static str,
}

impl Default for BuildInfo {
    fn default() -> Self {
        Self {
            version: VERSION,
            build_time: env!("BUILD_TIME"),
            git_hash: env!("GIT_HASH"),
            rust_version: env!("RUST_VERSION"),
        }
    }
}

impl std::fmt::Display for BuildInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {} ({}, built with {})",
            NAME, self.version, self.git_hash, self.rust_version
        )
    }
}

/// Build
pub fn build_info() -> BuildInfo {
    BuildInfo::default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_info() {
        let info = build_info();
        assert_eq!(info.version, VERSION);
        assert!(!info.git_hash.is_empty());
        assert!(info.build_time.parse::<u64>().is_ok());
        assert!(info.to_string().starts_with(NAME));
    }

    #[test]
    fn test_constants() {
        assert_eq!(VERSION, env!("CARGO_PKG_VERSION"));
        assert_eq!(NAME, "product-optimizer-rs");
        assert!(!DESCRIPTION.is_empty());
    }
}
