//! Declared configuration and observed state

use super::ResourceKind;
use reconcile_fs::constants::{DEFAULT_DIRECTORY_PERMISSIONS, DEFAULT_FILE_PERMISSIONS};
use reconcile_fs::{Mode, ResourceId, format_permissions};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

/// Declared state of a file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileConfig {
    /// Natural key. Changing it means replacing the resource.
    pub path: String,
    /// Desired bytes.
    pub content: Vec<u8>,
    /// Octal permission text, e.g. `"0644"`.
    pub permissions: String,
}

impl FileConfig {
    /// An empty file at `path` with the default permissions.
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: Vec::new(),
            permissions: DEFAULT_FILE_PERMISSIONS.to_string(),
        }
    }

    pub fn with_content(mut self, content: impl Into<Vec<u8>>) -> Self {
        self.content = content.into();
        self
    }

    pub fn with_permissions(mut self, permissions: impl Into<String>) -> Self {
        self.permissions = permissions.into();
        self
    }
}

/// Declared state of a directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryConfig {
    /// Natural key. Changing it means replacing the resource.
    pub path: String,
    /// Octal permission text. Changing it means replacing the resource.
    pub permissions: String,
}

impl DirectoryConfig {
    /// A directory at `path` with the default permissions.
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            permissions: DEFAULT_DIRECTORY_PERMISSIONS.to_string(),
        }
    }

    pub fn with_permissions(mut self, permissions: impl Into<String>) -> Self {
        self.permissions = permissions.into();
        self
    }
}

/// What is known about a resource after its last lifecycle operation.
///
/// Callers hold on to this between calls. `id == None` means the object does
/// not exist, either because it was never created or because a read found it
/// gone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceState {
    pub id: Option<ResourceId>,
    pub kind: ResourceKind,
    pub path: String,
    /// File bytes as last read. Always `None` for directories.
    pub content: Option<Vec<u8>>,
    /// Permission bits as last read.
    pub permissions: Option<Mode>,
}

impl ResourceState {
    /// State of a file at `path` that has not been read yet.
    pub fn file(path: impl Into<String>) -> Self {
        Self::unread(ResourceKind::File, path.into())
    }

    /// State of a directory at `path` that has not been read yet.
    pub fn directory(path: impl Into<String>) -> Self {
        Self::unread(ResourceKind::Directory, path.into())
    }

    fn unread(kind: ResourceKind, path: String) -> Self {
        Self {
            id: None,
            kind,
            path,
            content: None,
            permissions: None,
        }
    }

    /// Whether the object existed at the last operation.
    pub fn exists(&self) -> bool {
        self.id.is_some()
    }

    /// Permissions as four octal digits.
    pub fn permissions_string(&self) -> Option<String> {
        self.permissions.map(format_permissions)
    }

    /// Content as text, replacing invalid UTF-8.
    pub fn content_str(&self) -> Option<Cow<'_, str>> {
        self.content.as_deref().map(String::from_utf8_lossy)
    }
}
