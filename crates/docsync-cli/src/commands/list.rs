//! List-remote command

use std::path::Path;

use super::{build_engine, format_time};
use crate::error::Result;

/// Run the list-remote command
///
/// Prints every document currently stored in the remote project.
pub fn run_list_remote(path: &Path) -> Result<()> {
    let engine = build_engine(path)?;
    let mut remote = engine.list_remote()?;

    if remote.is_empty() {
        println!();
        println!("No files found on remote.");
        return Ok(());
    }

    remote.sort_by(|a, b| a.relative_path.cmp(&b.relative_path));

    println!();
    println!("Remote Files:");
    println!("{:<25} File", "Updated At");
    println!("{}", "-".repeat(65));
    for record in &remote {
        println!(
            "{:<25} {}",
            format_time(&record.updated_at),
            record.relative_path
        );
    }

    println!();
    println!("Total files: {}", remote.len());
    Ok(())
}
