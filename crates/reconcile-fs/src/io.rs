//! Mode-aware I/O operations with file locking
//!
//! Managed files are rewritten in place: symlinks are followed, hard links
//! and ownership survive, and only the file itself needs to be writable.
//! Config files go through [`write_atomic`] instead. In both cases the
//! requested mode is applied with an explicit chmod, since the process umask
//! masks the creation mode.
//!
//! Writers hold an exclusive lock on the target and readers a shared one, so
//! a read never observes a half-written file from a cooperating writer.

use crate::{Error, Mode, Result};
use fs2::FileExt;
use serde::{Deserialize, Serialize};
use std::fs::{self, File, Metadata, OpenOptions};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

/// Durability knobs for writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RobustnessConfig {
    /// Flush file content to disk before returning.
    pub enable_fsync: bool,
}

impl Default for RobustnessConfig {
    fn default() -> Self {
        Self { enable_fsync: true }
    }
}

/// Stat `path`, following symlinks.
///
/// Returns `Ok(None)` when nothing exists at the path.
pub fn stat(path: &Path) -> Result<Option<Metadata>> {
    match fs::metadata(path) {
        Ok(metadata) => Ok(Some(metadata)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(Error::io(path, e)),
    }
}

/// Write `content` to `path` in place with exactly `mode`.
///
/// Creates the file if missing, otherwise truncates and rewrites the object
/// `path` resolves to. The parent directory must already exist. A failure
/// part way through can leave the file truncated.
pub fn write_file(
    path: &Path,
    content: &[u8],
    mode: Mode,
    robustness: RobustnessConfig,
) -> Result<()> {
    // Truncate only once the lock is held so shared readers never see a
    // partially written file.
    let file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(false)
        .open(path)
        .map_err(|e| Error::io(path, e))?;

    FileExt::lock_exclusive(&file).map_err(|_| Error::LockFailed {
        path: path.to_path_buf(),
    })?;

    let written = write_locked(&file, path, content, mode, robustness);

    FileExt::unlock(&file).map_err(|_| Error::LockFailed {
        path: path.to_path_buf(),
    })?;
    written?;

    tracing::debug!(path = %path.display(), %mode, bytes = content.len(), "Wrote file");
    Ok(())
}

fn write_locked(
    mut file: &File,
    path: &Path,
    content: &[u8],
    mode: Mode,
    robustness: RobustnessConfig,
) -> Result<()> {
    file.set_len(0).map_err(|e| Error::io(path, e))?;
    file.write_all(content).map_err(|e| Error::io(path, e))?;

    if robustness.enable_fsync {
        file.sync_all().map_err(|e| Error::io(path, e))?;
    }

    set_mode(path, mode)
}

/// Replace `path` with `content` via a sibling temp file and a rename.
///
/// Readers see either the old or the new content, never a mix. The rename
/// replaces a symlink at `path` rather than following it, and needs write
/// permission on the parent directory.
pub fn write_atomic(
    path: &Path,
    content: &[u8],
    mode: Mode,
    robustness: RobustnessConfig,
) -> Result<()> {
    let temp_path = temp_path_for(path)?;

    if let Err(e) = write_temp(&temp_path, content, mode, robustness) {
        let _ = fs::remove_file(&temp_path);
        return Err(e);
    }

    if let Err(e) = fs::rename(&temp_path, path) {
        let _ = fs::remove_file(&temp_path);
        return Err(Error::io(path, e));
    }

    tracing::debug!(path = %path.display(), %mode, bytes = content.len(), "Replaced file");
    Ok(())
}

/// Temp file in the same directory as `path`, so the rename stays on one
/// filesystem.
fn temp_path_for(path: &Path) -> Result<PathBuf> {
    let file_name = path.file_name().ok_or_else(|| {
        Error::io(
            path,
            std::io::Error::new(std::io::ErrorKind::InvalidInput, "path has no file name"),
        )
    })?;

    let temp_name = format!(
        ".{}.{}.tmp",
        file_name.to_string_lossy(),
        std::process::id()
    );
    Ok(path.with_file_name(temp_name))
}

fn write_temp(
    temp_path: &Path,
    content: &[u8],
    mode: Mode,
    robustness: RobustnessConfig,
) -> Result<()> {
    let mut temp_file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(temp_path)
        .map_err(|e| Error::io(temp_path, e))?;

    temp_file
        .write_all(content)
        .map_err(|e| Error::io(temp_path, e))?;

    if robustness.enable_fsync {
        temp_file.sync_all().map_err(|e| Error::io(temp_path, e))?;
    }

    set_mode(temp_path, mode)
}

/// Read the full content of the file at `path` under a shared lock.
pub fn read_file(path: &Path) -> Result<Vec<u8>> {
    let file = File::open(path).map_err(|e| Error::io(path, e))?;
    FileExt::lock_shared(&file).map_err(|_| Error::LockFailed {
        path: path.to_path_buf(),
    })?;

    // Read through the locked handle
    let mut content = Vec::new();
    let read = (&file).read_to_end(&mut content);

    FileExt::unlock(&file).map_err(|_| Error::LockFailed {
        path: path.to_path_buf(),
    })?;
    read.map_err(|e| Error::io(path, e))?;
    Ok(content)
}

/// Like [`read_file`], but a missing file is `Ok(None)`.
pub fn read_existing(path: &Path) -> Result<Option<Vec<u8>>> {
    match read_file(path) {
        Ok(content) => Ok(Some(content)),
        Err(e) if e.is_not_found() => Ok(None),
        Err(e) => Err(e),
    }
}

/// Read the file at `path` as UTF-8 text.
pub fn read_text(path: &Path) -> Result<String> {
    let bytes = read_file(path)?;
    String::from_utf8(bytes).map_err(|e| {
        Error::io(
            path,
            std::io::Error::new(std::io::ErrorKind::InvalidData, e),
        )
    })
}

/// Create `path` and any missing ancestors, requesting `mode` for each new
/// directory. The process umask still applies; follow with [`set_mode`] when
/// the exact mode matters.
pub fn create_dir_all(path: &Path, mode: Mode) -> Result<()> {
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        fs::DirBuilder::new()
            .recursive(true)
            .mode(mode.bits())
            .create(path)
            .map_err(|e| Error::io(path, e))
    }

    #[cfg(not(unix))]
    {
        let _ = mode;
        fs::create_dir_all(path).map_err(|e| Error::io(path, e))
    }
}

/// Set the permission bits of `path` to exactly `mode`.
pub fn set_mode(path: &Path, mode: Mode) -> Result<()> {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(mode.bits()))
            .map_err(|e| Error::io(path, e))
    }

    #[cfg(not(unix))]
    {
        let metadata = fs::metadata(path).map_err(|e| Error::io(path, e))?;
        let mut permissions = metadata.permissions();
        permissions.set_readonly(!mode.owner_writable());
        fs::set_permissions(path, permissions).map_err(|e| Error::io(path, e))
    }
}

/// Permission bits reported by `metadata`.
pub fn mode_of(metadata: &Metadata) -> Mode {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        Mode::from_bits(metadata.permissions().mode())
    }

    #[cfg(not(unix))]
    {
        let bits = match (metadata.is_dir(), metadata.permissions().readonly()) {
            (true, true) => 0o555,
            (true, false) => 0o755,
            (false, true) => 0o444,
            (false, false) => 0o644,
        };
        Mode::from_bits(bits)
    }
}
