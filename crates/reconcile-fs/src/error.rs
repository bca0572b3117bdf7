//! Error types for reconcile-fs

use std::path::PathBuf;

/// Result type for reconcile-fs operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in reconcile-fs operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid permission format: {input:?} ({reason})")]
    InvalidPermissionFormat { input: String, reason: String },

    #[error("Failed to parse {format} config at {path}: {message}")]
    ConfigParse {
        path: PathBuf,
        format: String,
        message: String,
    },

    #[error("Failed to serialize {format} config for {path}: {message}")]
    ConfigSerialize {
        path: PathBuf,
        format: String,
        message: String,
    },

    #[error("Unsupported config format: {extension}")]
    UnsupportedFormat { extension: String },

    #[error("Lock acquisition failed for {path}")]
    LockFailed { path: PathBuf },
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn invalid_permissions(input: &str, reason: impl Into<String>) -> Self {
        Self::InvalidPermissionFormat {
            input: input.to_string(),
            reason: reason.into(),
        }
    }

    /// The underlying I/O error, if this error wraps one.
    pub fn io_source(&self) -> Option<&std::io::Error> {
        match self {
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }

    /// Whether this error wraps an I/O "not found" condition.
    pub fn is_not_found(&self) -> bool {
        self.io_source()
            .is_some_and(|e| e.kind() == std::io::ErrorKind::NotFound)
    }
}
