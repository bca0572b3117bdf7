//! Regular file resource

use super::{FileConfig, Resource, ResourceKind, ResourceState, parse_mode, type_mismatch};
use crate::plan::FieldChange;
use crate::settings::ProviderSettings;
use crate::{Error, Result};
use reconcile_fs::{checksum, identify, io};
use std::path::Path;

/// Reconciles a single regular file: content and permission bits.
#[derive(Debug, Clone, Default)]
pub struct FileResource {
    settings: ProviderSettings,
}

impl FileResource {
    pub fn new(settings: ProviderSettings) -> Self {
        Self { settings }
    }

    /// Rewrite the file with the declared content and permissions.
    ///
    /// The path is taken from `state`; a different `config.path` is a
    /// replacement, not an update. The file is only rewritten when content or
    /// permissions differ from `state`. Always concludes with a read.
    pub fn update(&self, config: &FileConfig, state: ResourceState) -> Result<ResourceState> {
        let mode = parse_mode(&config.permissions)?;

        if config.path != state.path {
            tracing::warn!(
                declared = %config.path,
                recorded = %state.path,
                "Path changes require replacement; keeping recorded path"
            );
        }

        let content_changed = state.content.as_deref() != Some(config.content.as_slice());
        let permissions_changed = state.permissions != Some(mode);

        if content_changed || permissions_changed {
            let path = Path::new(&state.path);
            io::write_file(path, &config.content, mode, self.settings.robustness).map_err(
                |source| Error::FileWriteFailed {
                    path: state.path.clone(),
                    source,
                },
            )?;
            tracing::info!(
                path = %state.path,
                %mode,
                content_changed,
                permissions_changed,
                "Updated file"
            );
        } else {
            tracing::debug!(path = %state.path, "File already matches declaration");
        }

        self.read(state)
    }

    /// State for a file that is no longer on disk.
    fn absent(mut state: ResourceState) -> ResourceState {
        if state.exists() {
            tracing::warn!(path = %state.path, "File no longer exists; clearing identity");
        }
        state.id = None;
        state
    }
}

impl Resource for FileResource {
    type Config = FileConfig;

    const KIND: ResourceKind = ResourceKind::File;

    fn create(&self, config: &FileConfig) -> Result<ResourceState> {
        let mode = parse_mode(&config.permissions)?;
        let path = Path::new(&config.path);

        let existing = io::stat(path).map_err(|source| Error::FileReadFailed {
            path: config.path.clone(),
            source,
        })?;
        if let Some(metadata) = existing.filter(|m| !m.is_file()) {
            return Err(type_mismatch(&config.path, Self::KIND, &metadata));
        }

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            io::create_dir_all(parent, self.settings.ancestor_directory_mode).map_err(
                |source| Error::DirectoryCreationFailed {
                    path: parent.display().to_string(),
                    source,
                },
            )?;
        }

        io::write_file(path, &config.content, mode, self.settings.robustness).map_err(
            |source| Error::FileWriteFailed {
                path: config.path.clone(),
                source,
            },
        )?;

        let id = identify(&config.path);
        tracing::info!(path = %config.path, %id, %mode, "Created file");

        self.read(ResourceState {
            id: Some(id),
            ..ResourceState::file(config.path.clone())
        })
    }

    fn read(&self, mut state: ResourceState) -> Result<ResourceState> {
        let path = Path::new(&state.path);

        let metadata = io::stat(path).map_err(|source| Error::FileReadFailed {
            path: state.path.clone(),
            source,
        })?;

        let Some(metadata) = metadata else {
            return Ok(Self::absent(state));
        };

        if !metadata.is_file() {
            return Err(type_mismatch(&state.path, Self::KIND, &metadata));
        }

        let content = io::read_existing(path).map_err(|source| Error::FileReadFailed {
            path: state.path.clone(),
            source,
        })?;
        // Removed between the stat and the read
        let Some(content) = content else {
            return Ok(Self::absent(state));
        };

        state.permissions = Some(io::mode_of(&metadata));
        state.content = Some(content);
        tracing::debug!(path = %state.path, permissions = ?state.permissions_string(), "Read file");
        Ok(state)
    }

    fn delete(&self, mut state: ResourceState) -> Result<ResourceState> {
        match std::fs::remove_file(&state.path) {
            Ok(()) => tracing::info!(path = %state.path, "Deleted file"),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %state.path, "File already absent");
            }
            Err(e) => {
                return Err(Error::DeletionFailed {
                    source: reconcile_fs::Error::io(&state.path, e),
                    path: state.path,
                });
            }
        }

        state.id = None;
        Ok(state)
    }

    fn validate(&self, config: &FileConfig) -> Result<()> {
        parse_mode(&config.permissions).map(|_| ())
    }

    fn changes(&self, config: &FileConfig, state: &ResourceState) -> Result<Vec<FieldChange>> {
        let mode = parse_mode(&config.permissions)?;
        let mut changes = Vec::new();

        if config.path != state.path {
            changes.push(FieldChange::replace("path", &state.path, &config.path));
        }

        if state.content.as_deref() != Some(config.content.as_slice()) {
            changes.push(FieldChange::in_place(
                "content",
                state
                    .content
                    .as_deref()
                    .map(checksum::compute_content_checksum)
                    .unwrap_or_default(),
                checksum::compute_content_checksum(&config.content),
            ));
        }

        if state.permissions != Some(mode) {
            changes.push(FieldChange::in_place(
                "permissions",
                state.permissions_string().unwrap_or_default(),
                mode.to_string(),
            ));
        }

        Ok(changes)
    }
}
