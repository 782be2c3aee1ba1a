//! Temp-directory project builder

use std::fs;
use std::path::{Path, PathBuf};

use filetime::{FileTime, set_file_mtime};
use tempfile::TempDir;

/// A throwaway project tree with controlled modification times.
///
/// The directory is removed when the fixture is dropped.
pub struct TempProject {
    dir: TempDir,
}

impl TempProject {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("failed to create temp project"),
        }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    /// Write a file, creating parent directories as needed.
    pub fn write(&self, relative_path: &str, content: &str) -> PathBuf {
        let path = self.dir.path().join(relative_path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("failed to create parent dirs");
        }
        fs::write(&path, content).expect("failed to write file");
        path
    }

    /// Write a file and pin its mtime to a unix timestamp.
    pub fn write_with_mtime(&self, relative_path: &str, content: &str, unix_secs: i64) -> PathBuf {
        let path = self.write(relative_path, content);
        set_file_mtime(&path, FileTime::from_unix_time(unix_secs, 0))
            .expect("failed to set mtime");
        path
    }

    /// Write the ignore-rules file at the root.
    pub fn write_ignore_file(&self, rules: &str) -> PathBuf {
        self.write(".syncignore", rules)
    }
}

impl Default for TempProject {
    fn default() -> Self {
        Self::new()
    }
}
