//! Storage key derivation
//!
//! Keys are `{batch}-reference-{name}` for the reference image and
//! `{batch}-product-{ordinal}-{name}` for product images. Ordinals are 1-based
//! and disambiguate products that share an original filename. The original
//! name is not normalised; transports percent-encode keys when building URLs.

use super::identity::BatchId;
use crate::utils::error::{OptimizerError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Role of a file within a batch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileRole {
    /// The single reference image
    Reference,
    /// A product image at a 1-based position
    Product { ordinal: usize },
}

impl fmt::Display for FileRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileRole::Reference => f.write_str("reference"),
            FileRole::Product { ordinal } => write!(f, "product-{}", ordinal),
        }
    }
}

/// Name under which a file is written to the remote object store
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StorageKey(String);

impl StorageKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StorageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for StorageKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Derive the storage key for a file
pub fn derive_key(batch_id: &BatchId, role: FileRole, original_name: &str) -> Result<StorageKey> {
    if original_name.is_empty() {
        return Err(OptimizerError::validation(
            "Cannot derive a storage key for a file without a name",
        ));
    }
    if let FileRole::Product { ordinal: 0 } = role {
        return Err(OptimizerError::validation(
            "Product ordinals are 1-based, got 0",
        ));
    }

    Ok(StorageKey(format!("{}-{}-{}", batch_id, role, original_name)))
}
