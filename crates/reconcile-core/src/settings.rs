//! Provider-wide settings

use crate::Result;
use reconcile_fs::constants::DEFAULT_ANCESTOR_DIRECTORY_MODE;
use reconcile_fs::{ConfigStore, Mode, RobustnessConfig};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Settings shared by all resources of one provider instance.
///
/// Every field has a default, so an empty settings file is valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderSettings {
    /// Mode requested for ancestor directories created on behalf of a file.
    pub ancestor_directory_mode: Mode,
    /// Write durability.
    pub robustness: RobustnessConfig,
}

impl Default for ProviderSettings {
    fn default() -> Self {
        Self {
            ancestor_directory_mode: DEFAULT_ANCESTOR_DIRECTORY_MODE,
            robustness: RobustnessConfig::default(),
        }
    }
}

impl ProviderSettings {
    /// Load settings from a TOML, JSON or YAML file.
    pub fn load(path: &Path) -> Result<Self> {
        let settings = ConfigStore::new().load(path)?;
        tracing::debug!(?path, ?settings, "Loaded provider settings");
        Ok(settings)
    }

    pub fn with_ancestor_directory_mode(mut self, mode: Mode) -> Self {
        self.ancestor_directory_mode = mode;
        self
    }

    pub fn with_robustness(mut self, robustness: RobustnessConfig) -> Self {
        self.robustness = robustness;
        self
    }
}
