//! Sync command: preview, confirm, execute, summarize

use std::path::Path;

use colored::Colorize;
use dialoguer::Confirm;

use docsync_core::{SyncAction, SyncOptions, SyncSummary};

use super::build_engine;
use crate::error::{CliError, Result};

/// Run the sync command
///
/// Computes the plan once, previews it, asks for confirmation (unless
/// `--yes` or `--dry-run`), then executes that same plan. Exits
/// nonzero when any per-file operation failed.
pub fn run_sync(path: &Path, dry_run: bool, yes: bool) -> Result<()> {
    let engine = build_engine(path)?;
    let plan = engine.sync_status()?;

    if plan.is_noop() {
        println!();
        println!("{} No changes to sync.", "OK".green().bold());
        return Ok(());
    }

    let to_sync: Vec<_> = plan
        .actions
        .iter()
        .filter(|(_, action)| !matches!(action, SyncAction::Skip))
        .collect();

    if !to_sync.is_empty() {
        println!();
        println!("Files to sync:");
        for (file, action) in &to_sync {
            let describe = match action {
                SyncAction::Upload => "Upload new file",
                SyncAction::Replace { .. } => "Replace existing file",
                SyncAction::Skip => unreachable!("skips are filtered out"),
            };
            println!("  {file} - {describe}");
        }
    }

    if !plan.deletions.is_empty() {
        println!();
        println!("Remote files to delete:");
        for entry in &plan.deletions {
            println!("  {}", entry.relative_path);
        }
    }

    if dry_run {
        let summary = engine.execute(&plan, SyncOptions { dry_run: true });
        print_summary(&summary);
        return Ok(());
    }

    println!();
    println!("Summary of changes:");
    println!("  Files to upload/update: {}", to_sync.len());
    println!("  Remote files to delete: {}", plan.deletions.len());

    if !yes {
        let proceed = Confirm::new()
            .with_prompt("Do you want to proceed with these changes?")
            .default(false)
            .interact()?;
        if !proceed {
            println!("Sync cancelled.");
            return Ok(());
        }
    }

    println!();
    println!("{} Starting sync...", "=>".blue().bold());
    let summary = engine.execute(&plan, SyncOptions::default());
    print_summary(&summary);

    if summary.success() {
        Ok(())
    } else {
        Err(CliError::user(format!(
            "{} operations failed",
            summary.failed
        )))
    }
}

fn print_summary(summary: &SyncSummary) {
    print!("{}", render_summary(summary));
}

/// Render the per-file action log and the final counts.
fn render_summary(summary: &SyncSummary) -> String {
    use std::fmt::Write;

    let mut out = String::new();
    if !summary.actions.is_empty() {
        out.push('\n');
        for line in &summary.actions {
            let _ = writeln!(out, "  {line}");
        }
    }

    out.push('\n');
    let _ = writeln!(out, "Sync Summary:");
    let _ = writeln!(out, "  {} files uploaded", summary.uploaded);
    let _ = writeln!(out, "  {} files replaced", summary.replaced);
    let _ = writeln!(out, "  {} remote files deleted", summary.deleted);
    let _ = writeln!(out, "  {} files skipped (up to date)", summary.skipped);
    let _ = writeln!(out, "  {} operations failed", summary.failed);

    if !summary.errors.is_empty() {
        out.push('\n');
        let _ = writeln!(out, "{}", "Errors encountered:".red().bold());
        for error in &summary.errors {
            let _ = writeln!(out, "  {} {}", "!".red(), error);
        }
    }
    out
}
