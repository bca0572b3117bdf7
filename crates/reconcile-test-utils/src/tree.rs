//! [`TestTree`] builder for reconciliation test scenarios.

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A temporary directory tree with helpers to lay out fixtures and assert on
/// what a lifecycle operation left behind.
///
/// # Example
///
/// ```rust,no_run
/// use reconcile_test_utils::TestTree;
///
/// let tree = TestTree::new();
/// tree.write("existing.txt", "hello");
/// tree.assert_file_contains("existing.txt", "hello");
/// let declared = tree.path("nested/new.txt");
/// ```
pub struct TestTree {
    temp_dir: TempDir,
}

impl Default for TestTree {
    fn default() -> Self {
        Self::new()
    }
}

impl TestTree {
    /// Create an empty temporary directory.
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().unwrap(),
        }
    }

    /// Return the root path of the temporary directory.
    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Absolute native path of `relative`.
    pub fn native(&self, relative: &str) -> PathBuf {
        self.root().join(relative)
    }

    /// Absolute path of `relative` as the string a resource would declare.
    pub fn path(&self, relative: &str) -> String {
        self.native(relative).to_string_lossy().into_owned()
    }

    /// Write a plain file, creating parents as needed.
    pub fn write(&self, relative: &str, content: impl AsRef<[u8]>) {
        let path = self.native(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, content).unwrap();
    }

    /// Create a directory and its parents.
    pub fn mkdir(&self, relative: &str) {
        fs::create_dir_all(self.native(relative)).unwrap();
    }

    /// Remove whatever is at `relative`, file or directory.
    pub fn remove(&self, relative: &str) {
        let path = self.native(relative);
        if path.is_dir() {
            fs::remove_dir_all(&path).unwrap();
        } else {
            fs::remove_file(&path).unwrap();
        }
    }

    /// Permission bits of `relative`, masked to `0o7777`.
    #[cfg(unix)]
    pub fn mode(&self, relative: &str) -> u32 {
        use std::os::unix::fs::PermissionsExt;
        fs::metadata(self.native(relative))
            .unwrap()
            .permissions()
            .mode()
            & 0o7777
    }

    /// Set the permission bits of `relative`.
    #[cfg(unix)]
    pub fn chmod(&self, relative: &str, mode: u32) {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(self.native(relative), fs::Permissions::from_mode(mode)).unwrap();
    }

    /// Assert that `relative` exists.
    ///
    /// # Panics
    /// Panics with a descriptive message if the path does not exist.
    pub fn assert_exists(&self, relative: &str) {
        let full_path = self.native(relative);
        assert!(
            full_path.exists(),
            "Expected path to exist: {}",
            full_path.display()
        );
    }

    /// Assert that `relative` does **not** exist.
    ///
    /// # Panics
    /// Panics with a descriptive message if the path exists.
    pub fn assert_not_exists(&self, relative: &str) {
        let full_path = self.native(relative);
        assert!(
            !full_path.exists(),
            "Expected path NOT to exist: {}",
            full_path.display()
        );
    }

    /// Assert that `relative` is a directory.
    pub fn assert_is_dir(&self, relative: &str) {
        let full_path = self.native(relative);
        assert!(
            full_path.is_dir(),
            "Expected a directory at: {}",
            full_path.display()
        );
    }

    /// Assert that the file at `relative` contains `content`.
    ///
    /// # Panics
    /// Panics if the file cannot be read or does not contain `content`.
    pub fn assert_file_contains(&self, relative: &str, content: &str) {
        let full_path = self.native(relative);
        let file_content = fs::read_to_string(&full_path)
            .unwrap_or_else(|_| panic!("Could not read file: {}", full_path.display()));
        assert!(
            file_content.contains(content),
            "File {} does not contain expected content.\nExpected: {}\nActual: {}",
            full_path.display(),
            content,
            file_content
        );
    }
}
