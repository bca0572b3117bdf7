//! Lifecycle reconciliation of declared files and directories
//!
//! Compares a declared file or directory against the local filesystem and
//! converges it with one create, update or delete at a time:
//!
//! - **Resources**: [`FileResource`] and [`DirectoryResource`] implement the
//!   [`Resource`] lifecycle with drift and type-mismatch detection on read
//! - **Planning**: [`plan`] picks the minimal operation for one declaration
//! - **Reconciler**: [`Reconciler`] refreshes, plans and applies in one call
//! - **Diagnostics**: [`Diagnostics`] turns errors into reportable entries
//!
//! # Architecture
//!
//! ```text
//!        caller / orchestrator
//!                |
//!          reconcile-core
//!                |
//!          reconcile-fs
//! ```
//!
//! # Example
//!
//! ```no_run
//! use reconcile_core::{FileConfig, FileResource, Resource};
//!
//! fn example() -> reconcile_core::Result<()> {
//!     let files = FileResource::default();
//!     let state = files.create(&FileConfig::new("/tmp/x.txt").with_content("hi"))?;
//!     assert_eq!(state.permissions_string().as_deref(), Some("0644"));
//!     Ok(())
//! }
//! ```

pub mod diagnostic;
pub mod error;
pub mod logging;
pub mod plan;
pub mod reconcile;
pub mod resource;
pub mod settings;

pub use diagnostic::{Diagnostic, Diagnostics};
pub use error::{Error, ErrorKind, Result};
pub use plan::{Action, FieldChange, Plan, plan};
pub use reconcile::{Outcome, Reconciler};
pub use resource::{
    DirectoryConfig, DirectoryResource, FileConfig, FileResource, Resource, ResourceKind,
    ResourceState,
};
pub use settings::ProviderSettings;

pub use reconcile_fs::{Mode, ResourceId, identify};
