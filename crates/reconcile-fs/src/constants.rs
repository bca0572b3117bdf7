//! Default permissions for declared resources.

use crate::Mode;

/// Permissions a file resource gets when none are declared.
pub const DEFAULT_FILE_PERMISSIONS: &str = "0644";

/// Permissions a directory resource gets when none are declared.
pub const DEFAULT_DIRECTORY_PERMISSIONS: &str = "0755";

/// Mode requested for ancestor directories created on behalf of a file.
pub const DEFAULT_ANCESTOR_DIRECTORY_MODE: Mode = Mode::from_bits(0o755);

/// Mode used when persisting configuration files.
pub const CONFIG_FILE_MODE: Mode = Mode::from_bits(0o644);
