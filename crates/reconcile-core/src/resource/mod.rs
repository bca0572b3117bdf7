//! Declared resources and their lifecycle
//!
//! Each resource kind reconciles one filesystem object at a declared path.
//! Operations are synchronous, touch the filesystem directly and never retry;
//! the caller serializes calls per resource.
//!
//! ```text
//! ABSENT  --create-->              PRESENT
//! PRESENT --read (still there)-->  PRESENT
//! PRESENT --read (gone)-->         ABSENT   (drift, not an error)
//! PRESENT --read (wrong type)-->   error
//! PRESENT --update (files only)--> PRESENT
//! PRESENT --delete-->              ABSENT
//! ABSENT  --delete-->              ABSENT
//! ```

mod directory;
mod file;
mod state;

pub use directory::DirectoryResource;
pub use file::FileResource;
pub use state::{DirectoryConfig, FileConfig, ResourceState};

use crate::plan::FieldChange;
use crate::{Error, Result};
use reconcile_fs::{Mode, parse_permissions};
use serde::{Deserialize, Serialize};
use std::fs::Metadata;

/// The kind of filesystem object a resource manages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    File,
    Directory,
}

impl ResourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::File => "file",
            Self::Directory => "directory",
        }
    }
}

impl std::fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lifecycle shared by every resource kind.
///
/// In-place updates are not part of the trait: only files support them, see
/// [`FileResource::update`].
pub trait Resource {
    /// Declared configuration for this kind.
    type Config;

    /// Kind of object managed.
    const KIND: ResourceKind;

    /// Bring the object into existence and return its state as read back
    /// from disk.
    fn create(&self, config: &Self::Config) -> Result<ResourceState>;

    /// Refresh `state` from disk. Clears the identity if the object is gone.
    fn read(&self, state: ResourceState) -> Result<ResourceState>;

    /// Remove the object. Already absent is success.
    fn delete(&self, state: ResourceState) -> Result<ResourceState>;

    /// Check a declaration without touching the filesystem.
    fn validate(&self, config: &Self::Config) -> Result<()>;

    /// Fields where `config` differs from `state`.
    fn changes(&self, config: &Self::Config, state: &ResourceState) -> Result<Vec<FieldChange>>;
}

pub(crate) fn parse_mode(permissions: &str) -> Result<Mode> {
    parse_permissions(permissions).map_err(|source| Error::InvalidPermissionFormat {
        input: permissions.to_string(),
        source,
    })
}

/// What kind of object `metadata` describes, for mismatch reports.
pub(crate) fn describe(metadata: &Metadata) -> &'static str {
    if metadata.is_dir() {
        "directory"
    } else if metadata.is_file() {
        "file"
    } else {
        "special file"
    }
}

pub(crate) fn type_mismatch(path: &str, expected: ResourceKind, metadata: &Metadata) -> Error {
    Error::TypeMismatch {
        path: path.to_string(),
        expected,
        found: describe(metadata),
    }
}
