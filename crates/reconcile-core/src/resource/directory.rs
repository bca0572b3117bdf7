//! Directory resource
//!
//! Directories have no in-place update. Their permissions are fixed at
//! creation; declaring different permissions replaces the directory.

use super::{DirectoryConfig, Resource, ResourceKind, ResourceState, parse_mode, type_mismatch};
use crate::plan::FieldChange;
use crate::{Error, Result};
use reconcile_fs::{identify, io};
use std::path::Path;

/// Reconciles a single directory and its permission bits.
///
/// Holds no settings: directories are always created with their declared
/// mode, ancestors included.
#[derive(Debug, Clone, Copy, Default)]
pub struct DirectoryResource;

impl DirectoryResource {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Resource for DirectoryResource {
    type Config = DirectoryConfig;

    const KIND: ResourceKind = ResourceKind::Directory;

    fn create(&self, config: &DirectoryConfig) -> Result<ResourceState> {
        let mode = parse_mode(&config.permissions)?;
        let path = Path::new(&config.path);

        let existing = io::stat(path).map_err(|source| Error::FileReadFailed {
            path: config.path.clone(),
            source,
        })?;
        if let Some(metadata) = existing.filter(|m| !m.is_dir()) {
            return Err(type_mismatch(&config.path, Self::KIND, &metadata));
        }

        let creation_failed = |source: reconcile_fs::Error| Error::DirectoryCreationFailed {
            path: config.path.clone(),
            source,
        };

        io::create_dir_all(path, mode).map_err(creation_failed)?;
        // The umask masks the mode given at creation; apply it again verbatim.
        io::set_mode(path, mode).map_err(creation_failed)?;

        let id = identify(&config.path);
        tracing::info!(path = %config.path, %id, %mode, "Created directory");

        self.read(ResourceState {
            id: Some(id),
            ..ResourceState::directory(config.path.clone())
        })
    }

    fn read(&self, mut state: ResourceState) -> Result<ResourceState> {
        let metadata = io::stat(Path::new(&state.path)).map_err(|source| {
            Error::FileReadFailed {
                path: state.path.clone(),
                source,
            }
        })?;

        let Some(metadata) = metadata else {
            if state.exists() {
                tracing::warn!(path = %state.path, "Directory no longer exists; clearing identity");
            }
            state.id = None;
            return Ok(state);
        };

        if !metadata.is_dir() {
            return Err(type_mismatch(&state.path, Self::KIND, &metadata));
        }

        state.permissions = Some(io::mode_of(&metadata));
        state.content = None;
        tracing::debug!(path = %state.path, permissions = ?state.permissions_string(), "Read directory");
        Ok(state)
    }

    fn delete(&self, mut state: ResourceState) -> Result<ResourceState> {
        let path = Path::new(&state.path);

        let existing = io::stat(path).map_err(|source| Error::DeletionFailed {
            path: state.path.clone(),
            source,
        })?;

        match existing {
            None => tracing::debug!(path = %state.path, "Directory already absent"),
            Some(metadata) if !metadata.is_dir() => {
                return Err(type_mismatch(&state.path, Self::KIND, &metadata));
            }
            Some(_) => match std::fs::remove_dir_all(path) {
                Ok(()) => tracing::info!(path = %state.path, "Deleted directory"),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                    tracing::debug!(path = %state.path, "Directory vanished during delete");
                }
                Err(e) => {
                    return Err(Error::DeletionFailed {
                        source: reconcile_fs::Error::io(path, e),
                        path: state.path.clone(),
                    });
                }
            },
        }

        state.id = None;
        Ok(state)
    }

    fn validate(&self, config: &DirectoryConfig) -> Result<()> {
        parse_mode(&config.permissions).map(|_| ())
    }

    fn changes(
        &self,
        config: &DirectoryConfig,
        state: &ResourceState,
    ) -> Result<Vec<FieldChange>> {
        let mode = parse_mode(&config.permissions)?;
        let mut changes = Vec::new();

        if config.path != state.path {
            changes.push(FieldChange::replace("path", &state.path, &config.path));
        }

        if state.permissions != Some(mode) {
            changes.push(FieldChange::replace(
                "permissions",
                state.permissions_string().unwrap_or_default(),
                mode.to_string(),
            ));
        }

        Ok(changes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reconcile_fs::Mode;

    #[test]
    fn permission_change_requires_replace() {
        let state = ResourceState {
            id: Some(identify("/srv/d")),
            permissions: Some(Mode::from_bits(0o755)),
            ..ResourceState::directory("/srv/d")
        };
        let config = DirectoryConfig::new("/srv/d").with_permissions("0700");

        let changes = DirectoryResource::default().changes(&config, &state).unwrap();

        assert_eq!(changes.len(), 1);
        assert_eq!(changes[0].field, "permissions");
        assert!(changes[0].requires_replace);
    }

    #[test]
    fn matching_directory_has_no_changes() {
        let state = ResourceState {
            id: Some(identify("/srv/d")),
            permissions: Some(Mode::from_bits(0o755)),
            ..ResourceState::directory("/srv/d")
        };

        let changes = DirectoryResource::default()
            .changes(&DirectoryConfig::new("/srv/d"), &state)
            .unwrap();

        assert!(changes.is_empty());
    }
}
