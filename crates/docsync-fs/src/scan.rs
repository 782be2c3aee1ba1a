//! Local directory scanning
//!
//! Produces the local half of the reconciliation input: a map of
//! relative path to modification time for every non-ignored file
//! under the scan root.

use std::collections::BTreeMap;
use std::path::Path;

use chrono::{DateTime, Utc};
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::{Error, IgnoreRules, Result};

/// Snapshot of the local tree: relative path -> modification time.
///
/// Paths always use forward slashes. The map is rebuilt on every scan;
/// files carry no persistent identity across runs.
pub type LocalSnapshot = BTreeMap<String, DateTime<Utc>>;

/// Walk `root` and collect modification times for files that pass the
/// ignore filter.
///
/// Directories are never pruned: the filter runs per file, so a
/// negation rule can re-include paths inside an otherwise-excluded
/// directory. Entries whose metadata cannot be read (broken symlinks,
/// permission errors) are skipped with a warning rather than failing
/// the scan.
pub fn scan(root: &Path, rules: &IgnoreRules) -> Result<LocalSnapshot> {
    if !root.is_dir() {
        return Err(Error::NotADirectory { path: root.into() });
    }

    let mut files = LocalSnapshot::new();
    for entry in WalkDir::new(root).follow_links(false) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                warn!(error = %err, "skipping unreadable entry");
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }
        let Ok(relative) = entry.path().strip_prefix(root) else {
            continue;
        };
        let relative = relative.to_string_lossy().replace('\\', "/");
        if rules.should_ignore(&relative) {
            continue;
        }
        let modified = match entry.metadata() {
            Ok(metadata) => match metadata.modified() {
                Ok(time) => time,
                Err(err) => {
                    warn!(path = %relative, error = %err, "skipping file without mtime");
                    continue;
                }
            },
            Err(err) => {
                warn!(path = %relative, error = %err, "skipping file with unreadable metadata");
                continue;
            }
        };
        files.insert(relative, DateTime::<Utc>::from(modified));
    }

    debug!(count = files.len(), root = %root.display(), "scanned local tree");
    Ok(files)
}
