//! Sync execution
//!
//! [`SyncEngine`] ties the scanner, the reconciler, and the remote
//! store together. Planning-phase failures (scanning, listing) abort
//! before anything is mutated; execution-phase failures are isolated
//! per file and aggregated into the [`SyncSummary`].

use std::fs;
use std::path::PathBuf;

use docsync_fs::{IgnoreRules, scan};
use docsync_remote::{RemoteFileRecord, RemoteStore};
use tracing::{info, warn};

use crate::plan::{SyncAction, SyncPlan, reconcile};
use crate::{Error, Result};

/// Options for sync execution
#[derive(Debug, Clone, Copy, Default)]
pub struct SyncOptions {
    /// If true, describe intended actions without calling the remote
    /// store. Action descriptions are prefixed with "[dry-run]".
    pub dry_run: bool,
}

/// Result of executing a sync plan.
#[derive(Debug, Clone, Default)]
pub struct SyncSummary {
    pub uploaded: usize,
    pub replaced: usize,
    pub deleted: usize,
    pub skipped: usize,
    pub failed: usize,
    /// Error messages for failed operations, in encounter order.
    pub errors: Vec<String>,
    /// Human-readable log of actions taken (or intended, on dry run).
    pub actions: Vec<String>,
}

impl SyncSummary {
    /// Whether every attempted operation succeeded.
    pub fn success(&self) -> bool {
        self.failed == 0
    }

    fn record_failure(&mut self, message: String) {
        warn!("{message}");
        self.failed += 1;
        self.errors.push(message);
    }
}

/// Engine for one-directional synchronization against a remote store.
pub struct SyncEngine {
    /// Root of the local tree being synced
    root: PathBuf,
    /// Compiled ignore rules applied during scanning
    rules: IgnoreRules,
    /// The remote document store
    store: Box<dyn RemoteStore>,
}

impl SyncEngine {
    pub fn new(root: impl Into<PathBuf>, rules: IgnoreRules, store: Box<dyn RemoteStore>) -> Self {
        Self {
            root: root.into(),
            rules,
            store,
        }
    }

    /// The local root being synced.
    pub fn root(&self) -> &PathBuf {
        &self.root
    }

    /// List remote documents, for status reporting.
    pub fn list_remote(&self) -> Result<Vec<RemoteFileRecord>> {
        Ok(self.store.list()?)
    }

    /// Compute the current sync plan without mutating anything.
    ///
    /// Scan and listing failures are fatal here: nothing has been
    /// touched yet, so aborting is safe.
    pub fn sync_status(&self) -> Result<SyncPlan> {
        let local = scan(&self.root, &self.rules)?;
        let remote = self.store.list()?;
        Ok(reconcile(&local, &remote))
    }

    /// Plan and execute in one step.
    pub fn sync(&self, options: SyncOptions) -> Result<SyncSummary> {
        let plan = self.sync_status()?;
        Ok(self.execute(&plan, options))
    }

    /// Apply a sync plan against the remote store.
    ///
    /// Uploads and replacements run before the deletion set, so a
    /// rename-like change never deletes the old copy before the new
    /// one had its chance. Each item is fault-isolated: a failure is
    /// recorded in the summary and the run continues.
    pub fn execute(&self, plan: &SyncPlan, options: SyncOptions) -> SyncSummary {
        let mut summary = SyncSummary::default();

        for (path, action) in &plan.actions {
            match action {
                SyncAction::Skip => summary.skipped += 1,
                SyncAction::Upload => {
                    if options.dry_run {
                        summary.uploaded += 1;
                        summary.actions.push(format!("[dry-run] Would upload {path}"));
                        continue;
                    }
                    match self.upload_file(path) {
                        Ok(()) => {
                            summary.uploaded += 1;
                            summary.actions.push(format!("Uploaded {path}"));
                        }
                        Err(e) => summary.record_failure(format!("Error syncing {path}: {e}")),
                    }
                }
                SyncAction::Replace { remote_id } => {
                    if options.dry_run {
                        summary.replaced += 1;
                        summary
                            .actions
                            .push(format!("[dry-run] Would replace {path}"));
                        continue;
                    }
                    // Delete the old copy first, then upload. A failed
                    // upload after a successful delete leaves the remote
                    // copy absent until the next run; that gap is
                    // reported as a failure, never hidden.
                    let result = self
                        .store
                        .delete(remote_id)
                        .map_err(Error::from)
                        .and_then(|()| self.upload_file(path));
                    match result {
                        Ok(()) => {
                            summary.replaced += 1;
                            summary.actions.push(format!("Replaced {path}"));
                        }
                        Err(e) => summary.record_failure(format!("Error syncing {path}: {e}")),
                    }
                }
            }
        }

        for entry in &plan.deletions {
            let path = &entry.relative_path;
            if options.dry_run {
                summary.deleted += 1;
                summary
                    .actions
                    .push(format!("[dry-run] Would delete remote copy of {path}"));
                continue;
            }
            match self.store.delete(&entry.remote_id) {
                Ok(()) => {
                    summary.deleted += 1;
                    summary.actions.push(format!("Deleted remote copy of {path}"));
                }
                Err(e) => summary.record_failure(format!("Error deleting {path}: {e}")),
            }
        }

        info!(
            uploaded = summary.uploaded,
            replaced = summary.replaced,
            deleted = summary.deleted,
            skipped = summary.skipped,
            failed = summary.failed,
            dry_run = options.dry_run,
            "sync finished"
        );
        summary
    }

    /// Read the local file and upload it.
    ///
    /// Content is read at execution time, not planning time; a file
    /// changing in between is an accepted race.
    fn upload_file(&self, relative_path: &str) -> Result<()> {
        let local_path = self.root.join(relative_path);
        let content = fs::read_to_string(&local_path)
            .map_err(|e| docsync_fs::Error::io(&local_path, e))?;
        self.store.upload(relative_path, &content)?;
        Ok(())
    }
}
