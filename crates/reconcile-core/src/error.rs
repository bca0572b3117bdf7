//! Error types for reconcile-core
//!
//! One variant per failure a lifecycle operation can report. An object that
//! is simply absent during read or delete is not an error: it shows up as a
//! cleared identity on the returned state.

use crate::resource::ResourceKind;
use serde::Serialize;

/// Result type for reconcile-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in reconcile-core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Permission text is not a valid octal mode
    #[error("invalid permission format: {input}")]
    InvalidPermissionFormat {
        input: String,
        #[source]
        source: reconcile_fs::Error,
    },

    /// An ancestor or target directory could not be created
    #[error("error creating directory {path}: {source}")]
    DirectoryCreationFailed {
        path: String,
        #[source]
        source: reconcile_fs::Error,
    },

    /// File content or mode could not be written
    #[error("error writing file {path}: {source}")]
    FileWriteFailed {
        path: String,
        #[source]
        source: reconcile_fs::Error,
    },

    /// The object could not be inspected or its content read
    #[error("error reading {path}: {source}")]
    FileReadFailed {
        path: String,
        #[source]
        source: reconcile_fs::Error,
    },

    /// Something exists at the path but it is the wrong kind of object
    #[error("path {path} is a {found}, not a {expected}")]
    TypeMismatch {
        path: String,
        expected: ResourceKind,
        found: &'static str,
    },

    /// Removal failed for a reason other than the object being absent
    #[error("error deleting {path}: {source}")]
    DeletionFailed {
        path: String,
        #[source]
        source: reconcile_fs::Error,
    },

    /// A plan and the state it was computed from disagree
    #[error("internal error: {message}")]
    Internal { message: String },

    /// Filesystem error from reconcile-fs, e.g. while loading settings
    #[error(transparent)]
    Fs(#[from] reconcile_fs::Error),
}

/// Discriminant of [`Error`] without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    InvalidPermissionFormat,
    DirectoryCreationFailed,
    FileWriteFailed,
    FileReadFailed,
    TypeMismatch,
    DeletionFailed,
    Internal,
    Fs,
}

impl ErrorKind {
    /// Short human-readable title.
    pub fn summary(self) -> &'static str {
        match self {
            Self::InvalidPermissionFormat => "Invalid permission format",
            Self::DirectoryCreationFailed => "Directory creation failed",
            Self::FileWriteFailed => "File write failed",
            Self::FileReadFailed => "File read failed",
            Self::TypeMismatch => "Type mismatch",
            Self::DeletionFailed => "Deletion failed",
            Self::Internal => "Internal error",
            Self::Fs => "Filesystem error",
        }
    }
}

impl Error {
    /// The kind of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidPermissionFormat { .. } => ErrorKind::InvalidPermissionFormat,
            Self::DirectoryCreationFailed { .. } => ErrorKind::DirectoryCreationFailed,
            Self::FileWriteFailed { .. } => ErrorKind::FileWriteFailed,
            Self::FileReadFailed { .. } => ErrorKind::FileReadFailed,
            Self::TypeMismatch { .. } => ErrorKind::TypeMismatch,
            Self::DeletionFailed { .. } => ErrorKind::DeletionFailed,
            Self::Internal { .. } => ErrorKind::Internal,
            Self::Fs(_) => ErrorKind::Fs,
        }
    }

    /// The resource path this error concerns, if any.
    pub fn path(&self) -> Option<&str> {
        match self {
            Self::DirectoryCreationFailed { path, .. }
            | Self::FileWriteFailed { path, .. }
            | Self::FileReadFailed { path, .. }
            | Self::TypeMismatch { path, .. }
            | Self::DeletionFailed { path, .. } => Some(path),
            Self::InvalidPermissionFormat { .. } | Self::Internal { .. } | Self::Fs(_) => None,
        }
    }

    pub(crate) fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}
