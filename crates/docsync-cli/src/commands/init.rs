//! Init command: first-run project setup

use std::path::Path;

use colored::Colorize;

use docsync_core::config::PROJECT_CONFIG_FILE;
use docsync_core::{
    IGNORE_FILE_NAME, extension_summary, write_default_ignore, write_default_project_config,
};
use docsync_fs::{IgnoreRules, scan};

use crate::error::Result;

/// Run the init command
///
/// Scaffolds the project config and the default ignore file (neither
/// is touched if already present), then prints a summary of file
/// extensions found under the root with the new rules applied, so
/// users can tune `.syncignore` before the first sync.
pub fn run_init(path: &Path) -> Result<()> {
    if write_default_project_config(path)? {
        println!(
            "{} Created {} template; fill in your store URL and identifiers.",
            "OK".green().bold(),
            PROJECT_CONFIG_FILE.cyan()
        );
    }

    let created = write_default_ignore(path)?;
    if created {
        println!(
            "{} Created default {} file.",
            "OK".green().bold(),
            IGNORE_FILE_NAME.cyan()
        );
    } else {
        println!(
            "{} {} already exists; leaving it untouched.",
            "OK".green().bold(),
            IGNORE_FILE_NAME.cyan()
        );
    }

    let rules = IgnoreRules::load(&path.join(IGNORE_FILE_NAME))?;
    let files = scan(path, &rules)?;
    let summary = extension_summary(&files);

    println!();
    println!("File extensions that would be synced:");
    for (extension, count) in &summary {
        println!("  {extension:<15} {count} files");
    }

    println!();
    println!(
        "Edit {} to customize which files to sync, store a session key with {}, then run {}.",
        IGNORE_FILE_NAME.cyan(),
        "docsync login".cyan(),
        "docsync sync".cyan()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    #[test]
    fn init_creates_ignore_file() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("main.rs"), "fn main() {}").unwrap();

        run_init(dir.path()).unwrap();
        assert!(dir.path().join(IGNORE_FILE_NAME).exists());
        assert!(dir.path().join(PROJECT_CONFIG_FILE).exists());
    }

    #[test]
    fn init_is_idempotent() {
        let dir = TempDir::new().unwrap();
        run_init(dir.path()).unwrap();
        fs::write(dir.path().join(IGNORE_FILE_NAME), "custom\n").unwrap();
        run_init(dir.path()).unwrap();

        // A second init never clobbers user edits.
        let content = fs::read_to_string(dir.path().join(IGNORE_FILE_NAME)).unwrap();
        assert_eq!(content, "custom\n");
    }
}
