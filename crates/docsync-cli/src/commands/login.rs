//! Login command: store a session key in the user-wide config

use std::path::Path;

use colored::Colorize;
use dialoguer::Password;

use docsync_core::config::SESSION_TTL_DAYS;
use docsync_core::{ConfigResolver, GlobalConfig, ProjectConfig};
use docsync_remote::credentials::SESSION_KEY_HELP;

use crate::error::{CliError, Result};

/// Run the login command
///
/// Stores a session key for the project's store in the user-wide
/// config, keyed by base URL. The key is taken from `--session-key`
/// when given, otherwise prompted for without echo.
pub fn run_login(path: &Path, session_key: Option<String>) -> Result<()> {
    let resolver = ConfigResolver::new(path);
    let project = ProjectConfig::load(&resolver.project_config_path())?;

    let key = match session_key {
        Some(key) => key,
        None => {
            println!("{SESSION_KEY_HELP}");
            println!();
            Password::new().with_prompt("Session key").interact()?
        }
    };
    let key = key.trim();
    if key.is_empty() {
        return Err(CliError::user("session key must not be empty"));
    }

    let global_path = resolver
        .global_config_path()
        .ok_or_else(|| CliError::user("could not determine the home directory"))?;
    let mut global = GlobalConfig::load(&global_path)?;
    global.set_session(project.base_url.as_str(), key, Some(project.organization_id));
    global.save(&global_path)?;

    println!(
        "{} Stored session key for {} (expires in {} days).",
        "OK".green().bold(),
        project.base_url.cyan(),
        SESSION_TTL_DAYS
    );
    Ok(())
}
