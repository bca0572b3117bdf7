//! Single-resource reconciliation
//!
//! Refreshes the recorded state, plans, and applies exactly one lifecycle
//! operation. Ordering across resources belongs to the caller; nothing here
//! retries or rolls back a partially applied operation.

use crate::plan::{Action, FieldChange, plan};
use crate::resource::{
    DirectoryConfig, DirectoryResource, FileConfig, FileResource, Resource, ResourceState,
};
use crate::settings::ProviderSettings;
use crate::{Error, Result};

/// Result of one reconciliation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    /// Operation that was applied
    pub action: Action,
    /// Field changes that led to the action
    pub changes: Vec<FieldChange>,
    /// State to record for the next call; `None` if nothing was ever known
    pub state: Option<ResourceState>,
}

/// Converges individual file and directory declarations.
#[derive(Debug, Clone, Default)]
pub struct Reconciler {
    files: FileResource,
    directories: DirectoryResource,
}

impl Reconciler {
    pub fn new(settings: ProviderSettings) -> Self {
        Self {
            files: FileResource::new(settings),
            directories: DirectoryResource::new(),
        }
    }

    /// Converge one file. `config == None` deletes it.
    pub fn reconcile_file(
        &self,
        config: Option<&FileConfig>,
        prior: Option<ResourceState>,
    ) -> Result<Outcome> {
        converge(&self.files, config, prior, |config, state| {
            self.files.update(config, state)
        })
    }

    /// Converge one directory. `config == None` deletes it.
    pub fn reconcile_directory(
        &self,
        config: Option<&DirectoryConfig>,
        prior: Option<ResourceState>,
    ) -> Result<Outcome> {
        converge(&self.directories, config, prior, |_, state| {
            Err(Error::internal(format!(
                "directory {} planned for in-place update",
                state.path
            )))
        })
    }
}

fn converge<R: Resource>(
    resource: &R,
    config: Option<&R::Config>,
    prior: Option<ResourceState>,
    update: impl FnOnce(&R::Config, ResourceState) -> Result<ResourceState>,
) -> Result<Outcome> {
    let current = match prior {
        Some(state) if state.exists() => Some(resource.read(state)?),
        other => other,
    };

    let plan = plan(resource, config, current.as_ref())?;
    let action = plan.action;

    let state = match (action, config, current) {
        (Action::NoOp, _, current) => current,
        (Action::Create, Some(config), _) => Some(resource.create(config)?),
        (Action::Update, Some(config), Some(current)) => Some(update(config, current)?),
        (Action::Replace, Some(config), Some(current)) => {
            resource.delete(current)?;
            Some(resource.create(config)?)
        }
        (Action::Delete, _, Some(current)) => Some(resource.delete(current)?),
        (action, _, _) => {
            return Err(Error::internal(format!(
                "planned {action} for a {} without the inputs it needs",
                R::KIND
            )));
        }
    };

    tracing::info!(kind = %R::KIND, %action, "Reconciled");
    Ok(Outcome {
        action,
        changes: plan.changes,
        state,
    })
}
