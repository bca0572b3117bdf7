//! Planning: which single operation converges a resource
//!
//! A plan compares one declaration against the state last read for it and
//! picks the minimal lifecycle operation. Field mutability decides between
//! an in-place update and a replacement.

use crate::Result;
use crate::resource::{Resource, ResourceState};
use serde::Serialize;

/// Lifecycle operation selected by a plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    /// Nothing exists yet; create it
    Create,
    /// Apply changes in place
    Update,
    /// Delete then create
    Replace,
    /// Declaration removed; delete the object
    Delete,
    /// Already converged
    NoOp,
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Create => write!(f, "create"),
            Self::Update => write!(f, "update"),
            Self::Replace => write!(f, "replace"),
            Self::Delete => write!(f, "delete"),
            Self::NoOp => write!(f, "no-op"),
        }
    }
}

/// One field whose declared value differs from what is on disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldChange {
    /// Field name
    pub field: &'static str,
    /// Recorded value; content is shown as a checksum
    pub before: String,
    /// Declared value; content is shown as a checksum
    pub after: String,
    /// The change cannot be applied in place
    pub requires_replace: bool,
}

impl FieldChange {
    pub fn in_place(field: &'static str, before: impl Into<String>, after: impl Into<String>) -> Self {
        Self {
            field,
            before: before.into(),
            after: after.into(),
            requires_replace: false,
        }
    }

    pub fn replace(field: &'static str, before: impl Into<String>, after: impl Into<String>) -> Self {
        Self {
            requires_replace: true,
            ..Self::in_place(field, before, after)
        }
    }
}

/// The chosen action and the field changes that motivated it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Plan {
    pub action: Action,
    pub changes: Vec<FieldChange>,
}

impl Plan {
    fn new(action: Action) -> Self {
        Self {
            action,
            changes: Vec::new(),
        }
    }

    /// Whether applying this plan would touch the filesystem.
    pub fn has_changes(&self) -> bool {
        self.action != Action::NoOp
    }
}

/// Decide how to converge `state` towards `config`.
///
/// `config == None` means the resource is no longer declared. A state
/// without identity counts as absent.
///
/// # Errors
///
/// Returns [`crate::Error::InvalidPermissionFormat`] when the declared
/// permissions cannot be parsed.
pub fn plan<R: Resource>(
    resource: &R,
    config: Option<&R::Config>,
    state: Option<&ResourceState>,
) -> Result<Plan> {
    let state = state.filter(|s| s.exists());

    let plan = match (config, state) {
        (None, None) => Plan::new(Action::NoOp),
        (None, Some(_)) => Plan::new(Action::Delete),
        (Some(config), None) => {
            resource.validate(config)?;
            Plan::new(Action::Create)
        }
        (Some(config), Some(state)) => {
            let changes = resource.changes(config, state)?;
            let action = if changes.is_empty() {
                Action::NoOp
            } else if changes.iter().any(|c| c.requires_replace) {
                Action::Replace
            } else {
                Action::Update
            };
            Plan { action, changes }
        }
    };

    tracing::debug!(kind = %R::KIND, action = %plan.action, changes = plan.changes.len(), "Planned");
    Ok(plan)
}
