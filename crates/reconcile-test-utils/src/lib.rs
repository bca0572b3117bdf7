//! Shared test utilities for the reconciler workspace.
//!
//! Dev-dependency only, never published.
//!
//! # Modules
//!
//! - [`tree`] - [`TestTree`] temp-dir builder with filesystem assertions

pub mod tree;

pub use tree::TestTree;

/// Whether the tests run as root, which bypasses permission checks.
pub fn is_root() -> bool {
    match std::process::Command::new("id").arg("-u").output() {
        Ok(output) => String::from_utf8_lossy(&output.stdout).trim() == "0",
        Err(_) => false,
    }
}
