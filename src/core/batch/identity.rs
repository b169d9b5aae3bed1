//! Batch identity
//!
//! One identifier per batch, generated at session start and never regenerated
//! by a reset.

use crate::utils::error::{OptimizerError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Opaque unique batch identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct BatchId(String);

impl BatchId {
    /// Generate a fresh random (UUID v4) identifier
    pub fn new_v4() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Wrap an externally supplied identifier.
    ///
    /// The id is embedded verbatim in storage keys, so it must start with an
    /// ASCII alphanumeric character and contain no `/`, whitespace or control
    /// characters.
    pub fn parse<S: Into<String>>(value: S) -> Result<Self> {
        let value = value.into();

        let first = value
            .chars()
            .next()
            .ok_or_else(|| OptimizerError::validation("Batch id cannot be empty"))?;
        if !first.is_ascii_alphanumeric() {
            return Err(OptimizerError::validation(format!(
                "Batch id must start with an alphanumeric character: {:?}",
                value
            )));
        }
        if let Some(bad) = value
            .chars()
            .find(|c| *c == '/' || c.is_whitespace() || c.is_control())
        {
            return Err(OptimizerError::validation(format!(
                "Batch id contains forbidden character {:?}: {:?}",
                bad, value
            )));
        }

        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BatchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for BatchId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for BatchId {
    type Error = OptimizerError;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(value)
    }
}

impl From<BatchId> for String {
    fn from(id: BatchId) -> Self {
        id.0
    }
}

/// Source of batch identifiers
pub trait IdentityProvider: Send + Sync {
    /// Produce a new identifier with negligible collision probability
    fn new_batch_id(&self) -> BatchId;
}

/// Random UUID v4 identities
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidIdentityProvider;

impl IdentityProvider for UuidIdentityProvider {
    fn new_batch_id(&self) -> BatchId {
        BatchId::new_v4()
    }
}
