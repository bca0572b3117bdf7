//! Path-derived resource identities
//!
//! An identity is the SHA-256 digest of the declared path string, rendered as
//! lowercase hex. The path is hashed exactly as given: `a/b` and `./a/b` are
//! different resources as far as identity is concerned.
//!
//! Uniqueness of identities is only as strong as uniqueness of paths, which
//! is not enforced here. Two resources declared on the same path share an
//! identity and reconciling both is undefined.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;

/// Opaque identifier of a reconciled resource.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResourceId(String);

impl ResourceId {
    /// The hex digest.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for ResourceId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Derive the identity of the resource declared at `path`.
pub fn identify(path: &str) -> ResourceId {
    let mut hasher = Sha256::new();
    hasher.update(path.as_bytes());
    ResourceId(format!("{:x}", hasher.finalize()))
}
