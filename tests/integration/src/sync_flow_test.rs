//! End-to-end sync flow tests
//!
//! These exercise the complete pipeline: ignore rules -> scan ->
//! reconcile -> execute, against the scripted in-memory store.

use docsync_core::{SyncEngine, SyncOptions};
use docsync_fs::IgnoreRules;
use docsync_test_utils::{ScriptedStore, StoreCall, TempProject};

// 2023-11-14T22:13:20Z
const T0: i64 = 1_700_000_000;

fn engine_for(project: &TempProject, store: &ScriptedStore) -> SyncEngine {
    let rules = IgnoreRules::load(&project.root().join(".syncignore")).unwrap();
    SyncEngine::new(project.root(), rules, Box::new(store.handle()))
}

#[test]
fn first_sync_uploads_everything() {
    let project = TempProject::new();
    project.write_ignore_file("*.log\n.syncignore\n");
    project.write("a.txt", "alpha");
    project.write("docs/guide.md", "# guide");
    project.write("debug.log", "noise");

    let store = ScriptedStore::new();
    let engine = engine_for(&project, &store);

    let summary = engine.sync(SyncOptions::default()).unwrap();
    assert_eq!(summary.uploaded, 2);
    assert_eq!(summary.failed, 0);
    assert!(summary.success());

    let mut paths: Vec<_> = store
        .docs()
        .into_iter()
        .map(|doc| doc.relative_path)
        .collect();
    paths.sort();
    assert_eq!(paths, vec!["a.txt", "docs/guide.md"]);
}

#[test]
fn second_run_is_a_noop() {
    let project = TempProject::new();
    project.write_ignore_file(".syncignore\n");
    project.write_with_mtime("a.txt", "alpha", T0);
    project.write_with_mtime("b.txt", "beta", T0);

    let store = ScriptedStore::new();
    let engine = engine_for(&project, &store);

    engine.sync(SyncOptions::default()).unwrap();
    let plan = engine.sync_status().unwrap();
    assert!(plan.is_noop());

    let summary = engine.execute(&plan, SyncOptions::default());
    assert_eq!(summary.skipped, 2);
    assert_eq!(summary.uploaded + summary.replaced + summary.deleted, 0);
}

#[test]
fn replace_and_delete_flow() {
    let project = TempProject::new();
    project.write_ignore_file(".syncignore\n");
    // Local copy is newer than the remote record.
    project.write_with_mtime("b.txt", "beta v2", T0 + 100);

    let store = ScriptedStore::new();
    store.push_doc("r-b", "b.txt", "2023-11-14T22:13:20Z");
    store.push_doc("r-stale", "stale.txt", "2023-11-14T22:13:20Z");

    let engine = engine_for(&project, &store);
    let summary = engine.sync(SyncOptions::default()).unwrap();

    assert_eq!(summary.replaced, 1);
    assert_eq!(summary.deleted, 1);
    assert_eq!(summary.failed, 0);

    let paths: Vec<_> = store
        .docs()
        .into_iter()
        .map(|doc| doc.relative_path)
        .collect();
    assert_eq!(paths, vec!["b.txt"]);

    // Replace removes the old record before uploading, and remote-only
    // deletions come after all uploads.
    let calls = store.calls();
    assert_eq!(
        calls,
        vec![
            StoreCall::List,
            StoreCall::Delete {
                remote_id: "r-b".into()
            },
            StoreCall::Upload {
                relative_path: "b.txt".into()
            },
            StoreCall::Delete {
                remote_id: "r-stale".into()
            },
        ]
    );
}

#[test]
fn one_failure_does_not_stop_the_run() {
    let project = TempProject::new();
    project.write_ignore_file(".syncignore\n");
    project.write("good.txt", "fine");
    project.write("bad.txt", "doomed");

    let store = ScriptedStore::new();
    store.fail_upload("bad.txt");

    let engine = engine_for(&project, &store);
    let summary = engine.sync(SyncOptions::default()).unwrap();

    assert_eq!(summary.uploaded, 1);
    assert_eq!(summary.failed, 1);
    assert!(!summary.success());
    assert_eq!(summary.errors.len(), 1);
    assert!(summary.errors[0].contains("bad.txt"));

    let paths: Vec<_> = store
        .docs()
        .into_iter()
        .map(|doc| doc.relative_path)
        .collect();
    assert_eq!(paths, vec!["good.txt"]);
}

#[test]
fn dry_run_leaves_the_remote_untouched() {
    let project = TempProject::new();
    project.write_ignore_file(".syncignore\n");
    project.write_with_mtime("a.txt", "alpha", T0 + 100);

    let store = ScriptedStore::new();
    store.push_doc("r-stale", "stale.txt", "2023-11-14T22:13:20Z");

    let engine = engine_for(&project, &store);
    let summary = engine.sync(SyncOptions { dry_run: true }).unwrap();

    assert_eq!(summary.uploaded, 1);
    assert_eq!(summary.deleted, 1);
    assert!(summary.actions.iter().all(|line| line.starts_with("[dry-run]")));

    // Only the listing hit the store.
    assert_eq!(store.calls(), vec![StoreCall::List]);
    assert_eq!(store.docs().len(), 1);
}

#[test]
fn negated_rules_whitelist_inside_excluded_dirs() {
    let project = TempProject::new();
    project.write_ignore_file("build/\n!keep.me\n.syncignore\n");
    project.write("build/out.bin", "binary");
    project.write("build/keep.me", "kept");
    project.write("src/main.rs", "fn main() {}");

    let store = ScriptedStore::new();
    let engine = engine_for(&project, &store);
    let plan = engine.sync_status().unwrap();

    let files: Vec<_> = plan.actions.keys().cloned().collect();
    assert_eq!(files, vec!["build/keep.me", "src/main.rs"]);
}
