//! Diagnostics handed back to whoever invoked a lifecycle operation
//!
//! An operation yields either a refreshed state or a list of diagnostics,
//! never both.

use crate::error::{Error, ErrorKind};
use serde::Serialize;
use std::error::Error as _;

/// One reportable failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub kind: ErrorKind,
    /// Short title
    pub summary: String,
    /// Full message including the cause chain
    pub detail: String,
    /// Resource path concerned, when known
    pub path: Option<String>,
}

impl From<&Error> for Diagnostic {
    fn from(error: &Error) -> Self {
        let mut detail = error.to_string();
        let mut source = error.source();
        while let Some(cause) = source {
            let cause_text = cause.to_string();
            // thiserror messages often embed their source already
            if !detail.contains(&cause_text) {
                detail.push_str(": ");
                detail.push_str(&cause_text);
            }
            source = cause.source();
        }

        let kind = error.kind();
        Self {
            kind,
            summary: kind.summary().to_string(),
            detail,
            path: error.path().map(str::to_string),
        }
    }
}

/// Diagnostics produced by one operation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Diagnostics(Vec<Diagnostic>);

impl Diagnostics {
    /// Split an operation result into its value or its diagnostics.
    pub fn from_result<T>(result: crate::Result<T>) -> Result<T, Diagnostics> {
        result.map_err(|e| Self::from(&e))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&Error> for Diagnostics {
    fn from(error: &Error) -> Self {
        Self(vec![Diagnostic::from(error)])
    }
}

impl std::fmt::Display for Diagnostics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, diagnostic) in self.0.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}: {}", diagnostic.summary, diagnostic.detail)?;
        }
        Ok(())
    }
}
