//! First-run helpers
//!
//! A fresh project gets a default ignore file and a summary of the
//! file extensions found under the root, so users can tune the rules
//! before their first real sync.

use std::fs;
use std::path::Path;

use tracing::info;

use crate::Result;
use crate::config::{PROJECT_CONFIG_FILE, ProjectConfig};
use docsync_fs::LocalSnapshot;

/// Name of the ignore-rules file at the sync root.
pub const IGNORE_FILE_NAME: &str = ".syncignore";

/// Default rules written by `docsync init`.
///
/// Hidden files are excluded wholesale with explicit escapes for the
/// two dotfiles worth syncing; the project config never leaves the
/// machine.
pub const DEFAULT_IGNORE_RULES: &str = "\
# Hidden files and directories
.*
!.gitignore
!.syncignore

# Version control and build output
.git/
target/
node_modules/
__pycache__/
*.pyc
*.so
*.class

# Local state
.DS_Store
.env
.docsync.json
";

/// Write the default ignore file if none exists.
///
/// Returns `true` when the file was created, `false` when one was
/// already present (the existing file is never touched).
pub fn write_default_ignore(root: &Path) -> Result<bool> {
    let path = root.join(IGNORE_FILE_NAME);
    if path.exists() {
        return Ok(false);
    }
    fs::write(&path, DEFAULT_IGNORE_RULES)?;
    info!(path = %path.display(), "created default ignore file");
    Ok(true)
}

/// Scaffold a project config with placeholder identifiers if none
/// exists, for the user to fill in before the first sync.
///
/// Returns `true` when the file was created, `false` when one was
/// already present (the existing file is never touched).
pub fn write_default_project_config(root: &Path) -> Result<bool> {
    let path = root.join(PROJECT_CONFIG_FILE);
    if path.exists() {
        return Ok(false);
    }
    let config = ProjectConfig {
        base_url: "https://your-store.example.com".to_string(),
        organization_id: "your-organization-id".to_string(),
        project_id: "your-project-id".to_string(),
    };
    config.save(&path)?;
    info!(path = %path.display(), "created project config template");
    Ok(true)
}

/// Count file extensions in a scanned snapshot, sorted by descending
/// count then by name. Extensionless files are grouped under
/// `[no extension]`.
pub fn extension_summary(files: &LocalSnapshot) -> Vec<(String, usize)> {
    let mut counts = std::collections::BTreeMap::<String, usize>::new();
    for path in files.keys() {
        let basename = path.rsplit('/').next().unwrap_or(path);
        let extension = match basename.rfind('.') {
            Some(idx) if idx > 0 => basename[idx..].to_ascii_lowercase(),
            _ => "[no extension]".to_string(),
        };
        *counts.entry(extension).or_default() += 1;
    }
    let mut summary: Vec<_> = counts.into_iter().collect();
    summary.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    summary
}
