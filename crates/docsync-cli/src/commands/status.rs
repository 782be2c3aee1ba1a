//! Status command: report the current sync plan without mutating

use std::path::Path;

use colored::Colorize;

use docsync_core::{SyncAction, SyncPlan};

use super::{build_engine, format_time};
use crate::error::Result;

/// Run the status command
///
/// Computes the sync plan and prints one line per local file (state,
/// last sync time, path) plus the set of remote files that would be
/// deleted.
pub fn run_status(path: &Path) -> Result<()> {
    let engine = build_engine(path)?;
    let plan = engine.sync_status()?;

    let total = plan.actions.len();
    let needs_sync = plan.pending();
    let up_to_date = total - needs_sync;

    println!();
    println!("Local File Status:");
    println!("{:<15} {:<25} File", "Status", "Last Sync");
    println!("{}", "-".repeat(70));
    for (file, action) in &plan.actions {
        let state = match action {
            SyncAction::Upload => "Upload".yellow(),
            SyncAction::Replace { .. } => "Replace".yellow(),
            SyncAction::Skip => "Up to date".green(),
        };
        let last_sync = last_sync_display(&plan, file);
        println!("{state:<15} {last_sync:<25} {file}");
    }

    if !plan.deletions.is_empty() {
        println!();
        println!("Remote Files to Delete:");
        for entry in &plan.deletions {
            println!("  {}", entry.relative_path);
        }
    }

    println!();
    println!("Summary:");
    println!("Total files:  {total}");
    println!("Need sync:    {needs_sync}");
    println!("Up to date:   {up_to_date}");
    if !plan.deletions.is_empty() {
        println!("To delete:    {}", plan.deletions.len());
    }

    Ok(())
}

/// Last-sync column value for one file: the formatted remote timestamp
/// when the file exists remotely, `Never` otherwise.
fn last_sync_display(plan: &SyncPlan, file: &str) -> String {
    match plan.last_synced.get(file) {
        Some(raw) => format_time(raw),
        None => "Never".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn last_sync_shows_remote_time_or_never() {
        let mut plan = SyncPlan::default();
        plan.actions.insert("a.txt".into(), SyncAction::Skip);
        plan.actions.insert("new.txt".into(), SyncAction::Upload);
        plan.last_synced
            .insert("a.txt".into(), "2023-11-14T22:13:20Z".into());

        assert_eq!(last_sync_display(&plan, "a.txt"), "2023-11-14 22:13:20");
        assert_eq!(last_sync_display(&plan, "new.txt"), "Never");
    }

    #[test]
    fn unparsable_remote_time_passes_through() {
        let mut plan = SyncPlan::default();
        plan.last_synced.insert("a.txt".into(), "garbage".into());
        assert_eq!(last_sync_display(&plan, "a.txt"), "garbage");
    }
}
