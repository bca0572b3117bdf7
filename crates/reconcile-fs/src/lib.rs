//! Filesystem primitives for the filesystem resource reconciler
//!
//! Provides octal permission handling, path-derived identities and
//! mode-aware I/O used by the resource lifecycle in `reconcile-core`.

pub mod checksum;
pub mod config;
pub mod constants;
pub mod error;
pub mod identity;
pub mod io;
pub mod permissions;

pub use config::ConfigStore;
pub use error::{Error, Result};
pub use identity::{ResourceId, identify};
pub use io::RobustnessConfig;
pub use permissions::{MAX_MODE, Mode, format_permissions, parse_permissions};
