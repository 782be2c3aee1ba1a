//! Command implementations

mod init;
mod list;
mod login;
mod status;
mod sync;

pub use init::run_init;
pub use list::run_list_remote;
pub use login::run_login;
pub use status::run_status;
pub use sync::run_sync;

use std::path::Path;

use chrono::DateTime;

use docsync_core::{ConfigResolver, IGNORE_FILE_NAME, SyncEngine};
use docsync_fs::IgnoreRules;
use docsync_remote::HttpRemoteStore;

use crate::error::Result;

/// Assemble a sync engine for the project at `root`.
///
/// Resolves configuration (fatal if missing or malformed), builds the
/// HTTP store with credentials from the global config, and loads the
/// ignore rules from the root.
pub(crate) fn build_engine(root: &Path) -> Result<SyncEngine> {
    let resolver = ConfigResolver::new(root);
    let config = resolver.resolve()?;
    let store = HttpRemoteStore::new(config.store_config(), &config)?;
    let rules = IgnoreRules::load(&root.join(IGNORE_FILE_NAME))?;
    Ok(SyncEngine::new(root, rules, Box::new(store)))
}

/// Format a remote timestamp for table display; unparsable values
/// pass through verbatim.
pub(crate) fn format_time(raw: &str) -> String {
    match DateTime::parse_from_rfc3339(raw) {
        Ok(time) => time.format("%Y-%m-%d %H:%M:%S").to_string(),
        Err(_) => raw.to_string(),
    }
}
