//! Reconciliation of local and remote file state
//!
//! [`reconcile`] diffs the local snapshot against the remote listing
//! and produces the minimal, idempotent [`SyncPlan`]: one action per
//! local file plus a deletion set for remote-only files.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use docsync_fs::LocalSnapshot;
use docsync_remote::RemoteFileRecord;
use tracing::warn;

/// The reconciler's decision for one local file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncAction {
    /// No remote counterpart exists.
    Upload,
    /// Local file is strictly newer than the remote copy.
    Replace { remote_id: String },
    /// Remote copy is current.
    Skip,
}

/// A remote file with no local counterpart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteEntry {
    pub relative_path: String,
    pub remote_id: String,
}

/// Output of reconciliation, immutable once built.
///
/// Invariants: every key in `actions` exists locally and passed the
/// ignore filter; every deletion path has no local counterpart; no
/// path appears in both.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncPlan {
    /// Per-path action, keyed by relative path.
    pub actions: BTreeMap<String, SyncAction>,
    /// Remote-only files to delete, ordered by path.
    pub deletions: Vec<DeleteEntry>,
    /// Raw remote `updated_at` per local path that exists remotely.
    /// Kept verbatim (even when unparsable) for status display; paths
    /// never uploaded have no entry.
    pub last_synced: BTreeMap<String, String>,
}

impl SyncPlan {
    /// Number of actions that will touch the remote (non-skip).
    pub fn pending(&self) -> usize {
        self.actions
            .values()
            .filter(|action| !matches!(action, SyncAction::Skip))
            .count()
    }

    /// Whether executing the plan would make no remote calls.
    pub fn is_noop(&self) -> bool {
        self.pending() == 0 && self.deletions.is_empty()
    }
}

/// Parse a remote timestamp into an absolute instant.
///
/// RFC 3339 with any offset (including `Z`), normalized to UTC so the
/// comparison never depends on the local clock's timezone.
fn parse_remote_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|t| t.with_timezone(&Utc))
}

/// Diff local state against the remote listing.
///
/// Local files missing remotely are uploaded; files whose local mtime
/// is strictly newer than the remote `updated_at` are replaced; equal
/// timestamps (compared at whole-second resolution, absorbing
/// filesystem time jitter) and older local files are skipped. Remote
/// records with an unparsable timestamp are treated as needing sync
/// rather than aborting, favoring re-sync over silent staleness.
/// Remote-only files become deletions. Duplicate remote paths resolve
/// to the last record listed.
pub fn reconcile(local: &LocalSnapshot, remote: &[RemoteFileRecord]) -> SyncPlan {
    let mut remote_by_path: BTreeMap<&str, &RemoteFileRecord> = BTreeMap::new();
    for record in remote {
        remote_by_path.insert(record.relative_path.as_str(), record);
    }

    let mut actions = BTreeMap::new();
    let mut last_synced = BTreeMap::new();
    for (path, modified) in local {
        if let Some(record) = remote_by_path.get(path.as_str()) {
            last_synced.insert(path.clone(), record.updated_at.clone());
        }
        let action = match remote_by_path.get(path.as_str()) {
            None => SyncAction::Upload,
            Some(record) => match parse_remote_timestamp(&record.updated_at) {
                Some(remote_time) => {
                    if modified.timestamp() > remote_time.timestamp() {
                        SyncAction::Replace {
                            remote_id: record.remote_id.clone(),
                        }
                    } else {
                        SyncAction::Skip
                    }
                }
                None => {
                    warn!(
                        path = path.as_str(),
                        updated_at = record.updated_at.as_str(),
                        "unparsable remote timestamp; scheduling replace"
                    );
                    SyncAction::Replace {
                        remote_id: record.remote_id.clone(),
                    }
                }
            },
        };
        actions.insert(path.clone(), action);
    }

    let deletions = remote_by_path
        .values()
        .filter(|record| !local.contains_key(&record.relative_path))
        .map(|record| DeleteEntry {
            relative_path: record.relative_path.clone(),
            remote_id: record.remote_id.clone(),
        })
        .collect();

    SyncPlan {
        actions,
        deletions,
        last_synced,
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    use super::*;

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(secs, 0).unwrap()
    }

    fn record(path: &str, id: &str, updated_at: &str) -> RemoteFileRecord {
        RemoteFileRecord {
            remote_id: id.into(),
            relative_path: path.into(),
            updated_at: updated_at.into(),
        }
    }

    const T0: i64 = 1_700_000_000;
    const T0_RFC3339: &str = "2023-11-14T22:13:20Z";

    #[test]
    fn local_only_file_is_uploaded() {
        let local = LocalSnapshot::from([("a.txt".to_string(), at(T0))]);
        let plan = reconcile(&local, &[]);
        assert_eq!(plan.actions["a.txt"], SyncAction::Upload);
        assert!(plan.deletions.is_empty());
    }

    #[test]
    fn newer_local_file_is_replaced() {
        let local = LocalSnapshot::from([("a.txt".to_string(), at(T0 + 60))]);
        let plan = reconcile(&local, &[record("a.txt", "r1", T0_RFC3339)]);
        assert_eq!(
            plan.actions["a.txt"],
            SyncAction::Replace {
                remote_id: "r1".into()
            }
        );
    }

    #[test]
    fn equal_timestamps_skip() {
        let local = LocalSnapshot::from([("a.txt".to_string(), at(T0))]);
        let plan = reconcile(&local, &[record("a.txt", "r1", T0_RFC3339)]);
        assert_eq!(plan.actions["a.txt"], SyncAction::Skip);
    }

    #[test]
    fn subsecond_difference_still_skips() {
        // Whole-second comparison absorbs filesystem time jitter.
        let local = LocalSnapshot::from([(
            "a.txt".to_string(),
            Utc.timestamp_opt(T0, 400_000_000).unwrap(),
        )]);
        let plan = reconcile(&local, &[record("a.txt", "r1", T0_RFC3339)]);
        assert_eq!(plan.actions["a.txt"], SyncAction::Skip);
    }

    #[test]
    fn older_local_file_skips() {
        let local = LocalSnapshot::from([("a.txt".to_string(), at(T0 - 60))]);
        let plan = reconcile(&local, &[record("a.txt", "r1", T0_RFC3339)]);
        assert_eq!(plan.actions["a.txt"], SyncAction::Skip);
    }

    #[test]
    fn remote_only_file_is_deleted() {
        let plan = reconcile(&LocalSnapshot::new(), &[record("b.txt", "r2", T0_RFC3339)]);
        assert!(plan.actions.is_empty());
        assert_eq!(
            plan.deletions,
            vec![DeleteEntry {
                relative_path: "b.txt".into(),
                remote_id: "r2".into()
            }]
        );
    }

    #[test]
    fn offset_timestamp_is_normalized_to_utc() {
        // Same instant as T0, expressed in a +05:00 offset.
        let local = LocalSnapshot::from([("a.txt".to_string(), at(T0))]);
        let plan = reconcile(&local, &[record("a.txt", "r1", "2023-11-15T03:13:20+05:00")]);
        assert_eq!(plan.actions["a.txt"], SyncAction::Skip);
    }

    #[test]
    fn unparsable_remote_timestamp_schedules_replace() {
        let local = LocalSnapshot::from([("a.txt".to_string(), at(T0))]);
        let plan = reconcile(&local, &[record("a.txt", "r1", "not-a-timestamp")]);
        assert_eq!(
            plan.actions["a.txt"],
            SyncAction::Replace {
                remote_id: "r1".into()
            }
        );
    }

    #[test]
    fn duplicate_remote_paths_resolve_to_last_record() {
        let local = LocalSnapshot::from([("a.txt".to_string(), at(T0 + 60))]);
        let remote = vec![
            record("a.txt", "r-old", T0_RFC3339),
            record("a.txt", "r-new", T0_RFC3339),
        ];
        let plan = reconcile(&local, &remote);
        assert_eq!(
            plan.actions["a.txt"],
            SyncAction::Replace {
                remote_id: "r-new".into()
            }
        );
    }

    #[test]
    fn duplicate_remote_only_paths_delete_once() {
        let remote = vec![
            record("b.txt", "r-old", T0_RFC3339),
            record("b.txt", "r-new", T0_RFC3339),
        ];
        let plan = reconcile(&LocalSnapshot::new(), &remote);
        assert_eq!(plan.deletions.len(), 1);
        assert_eq!(plan.deletions[0].remote_id, "r-new");
    }

    #[test]
    fn every_local_path_gets_exactly_one_action_and_no_overlap() {
        let local = LocalSnapshot::from([
            ("new.txt".to_string(), at(T0)),
            ("stale.txt".to_string(), at(T0 + 60)),
            ("fresh.txt".to_string(), at(T0)),
        ]);
        let remote = vec![
            record("stale.txt", "r1", T0_RFC3339),
            record("fresh.txt", "r2", T0_RFC3339),
            record("gone.txt", "r3", T0_RFC3339),
        ];
        let plan = reconcile(&local, &remote);

        assert_eq!(plan.actions.len(), local.len());
        for path in local.keys() {
            assert!(plan.actions.contains_key(path));
        }
        let deleted: Vec<_> = plan.deletions.iter().map(|d| &d.relative_path).collect();
        assert_eq!(deleted, vec!["gone.txt"]);
        for path in deleted {
            assert!(!plan.actions.contains_key(path));
        }
    }

    #[test]
    fn last_synced_records_remote_times_only_for_known_paths() {
        let local = LocalSnapshot::from([
            ("a.txt".to_string(), at(T0)),
            ("new.txt".to_string(), at(T0)),
        ]);
        let plan = reconcile(&local, &[record("a.txt", "r1", T0_RFC3339)]);
        assert_eq!(plan.last_synced["a.txt"], T0_RFC3339);
        // Never-uploaded files have no last-sync time at all.
        assert!(!plan.last_synced.contains_key("new.txt"));
    }

    #[test]
    fn last_synced_keeps_unparsable_timestamps_verbatim() {
        let local = LocalSnapshot::from([("a.txt".to_string(), at(T0))]);
        let plan = reconcile(&local, &[record("a.txt", "r1", "not-a-timestamp")]);
        assert_eq!(plan.last_synced["a.txt"], "not-a-timestamp");
    }

    #[test]
    fn noop_plan_detection() {
        let local = LocalSnapshot::from([("a.txt".to_string(), at(T0))]);
        let plan = reconcile(&local, &[record("a.txt", "r1", T0_RFC3339)]);
        assert!(plan.is_noop());
        assert_eq!(plan.pending(), 0);

        let plan = reconcile(&local, &[]);
        assert!(!plan.is_noop());
        assert_eq!(plan.pending(), 1);
    }
}
