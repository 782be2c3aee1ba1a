//! Configuration resolution
//!
//! Credentials live in a user-wide file (`~/.docsync/config.json`,
//! keyed by store base URL so one machine can hold sessions for
//! several stores); project identity lives in `.docsync.json` at the
//! sync root. The resolver merges both into one explicit
//! [`ResolvedConfig`] assembled at startup and passed into remote
//! store construction, with no ambient global state.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Duration, Utc};
use docsync_remote::credentials::SESSION_KEY_HELP;
use docsync_remote::{CredentialProvider, StoreConfig};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{Error, Result};

/// Per-project config file, at the sync root. Never contains the
/// session key.
pub const PROJECT_CONFIG_FILE: &str = ".docsync.json";

/// User-wide config directory under the home directory.
pub const GLOBAL_CONFIG_DIR: &str = ".docsync";

/// Credential file inside [`GLOBAL_CONFIG_DIR`].
pub const GLOBAL_CONFIG_FILE: &str = "config.json";

/// Assumed lifetime of a freshly stored session key.
pub const SESSION_TTL_DAYS: i64 = 7;

/// Stored session for one document store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionEntry {
    pub session_key: String,
    #[serde(default)]
    pub default_organization_id: Option<String>,
    #[serde(default)]
    pub expiration: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// The user-wide credential file: base URL -> session.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GlobalConfig {
    pub sessions: BTreeMap<String, SessionEntry>,
}

impl GlobalConfig {
    /// Load the global config; a missing file yields the default
    /// (empty) config rather than an error.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "no global config");
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| Error::ConfigInvalid {
            path: path.into(),
            message: e.to_string(),
        })
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    pub fn session_for(&self, base_url: &str) -> Option<&SessionEntry> {
        self.sessions.get(base_url)
    }

    /// Record a fresh session key for a store, with a
    /// [`SESSION_TTL_DAYS`] expiration window.
    pub fn set_session(
        &mut self,
        base_url: impl Into<String>,
        session_key: impl Into<String>,
        default_organization_id: Option<String>,
    ) {
        let now = Utc::now();
        self.sessions.insert(
            base_url.into(),
            SessionEntry {
                session_key: session_key.into(),
                default_organization_id,
                expiration: Some(now + Duration::days(SESSION_TTL_DAYS)),
                updated_at: Some(now),
            },
        );
    }
}

/// The per-project half of the configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectConfig {
    pub base_url: String,
    pub organization_id: String,
    pub project_id: String,
}

impl ProjectConfig {
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::ConfigNotFound { path: path.into() });
        }
        let content = fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| Error::ConfigInvalid {
            path: path.into(),
            message: e.to_string(),
        })
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }
}

/// The effective configuration after merging global and project files.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub base_url: String,
    pub organization_id: String,
    pub project_id: String,
    /// Session key from the global config; empty when none is stored.
    pub session_key: String,
    pub expiration: Option<DateTime<Utc>>,
}

impl ResolvedConfig {
    /// Connection parameters for [`docsync_remote::HttpRemoteStore`].
    pub fn store_config(&self) -> StoreConfig {
        StoreConfig {
            base_url: self.base_url.clone(),
            organization_id: self.organization_id.clone(),
            project_id: self.project_id.clone(),
        }
    }
}

impl CredentialProvider for ResolvedConfig {
    fn session_key(&self) -> docsync_remote::Result<String> {
        if self.session_key.is_empty() {
            return Err(docsync_remote::Error::auth(SESSION_KEY_HELP));
        }
        if let Some(expiration) = self.expiration
            && expiration <= Utc::now()
        {
            return Err(docsync_remote::Error::auth(SESSION_KEY_HELP));
        }
        Ok(self.session_key.clone())
    }
}

/// Identifiers are opaque but must at least look like identifiers;
/// catching a pasted URL or an empty string here beats a confusing
/// 404 from the server later.
fn validate_identifier(field: &'static str, value: &str) -> Result<()> {
    let valid = !value.is_empty()
        && value
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if valid {
        Ok(())
    } else {
        Err(Error::InvalidIdentifier {
            field,
            value: value.to_string(),
        })
    }
}

/// Merges the user-wide credential file with the per-project config.
pub struct ConfigResolver {
    /// Sync root containing the project config file
    root: PathBuf,
    /// Override for the global config directory (used for testing).
    /// When `None`, `~/.docsync/` is used via `dirs::home_dir()`.
    global_config_dir_override: Option<PathBuf>,
}

impl ConfigResolver {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            global_config_dir_override: None,
        }
    }

    /// Create a resolver with a custom global config directory, so
    /// tests never touch the real user config.
    pub fn with_global_config_dir(root: impl Into<PathBuf>, global_config_dir: PathBuf) -> Self {
        Self {
            root: root.into(),
            global_config_dir_override: Some(global_config_dir),
        }
    }

    pub fn global_config_path(&self) -> Option<PathBuf> {
        let dir = match &self.global_config_dir_override {
            Some(dir) => dir.clone(),
            None => dirs::home_dir()?.join(GLOBAL_CONFIG_DIR),
        };
        Some(dir.join(GLOBAL_CONFIG_FILE))
    }

    pub fn project_config_path(&self) -> PathBuf {
        self.root.join(PROJECT_CONFIG_FILE)
    }

    pub fn has_project_config(&self) -> bool {
        self.project_config_path().is_file()
    }

    /// Resolve the effective configuration.
    ///
    /// The project config is required and its identifiers are
    /// validated (fatal at startup). The global config contributes
    /// the session for the project's base URL when one is stored;
    /// credential absence surfaces later, through
    /// [`CredentialProvider::session_key`], with remediation text.
    pub fn resolve(&self) -> Result<ResolvedConfig> {
        let project_path = self.project_config_path();
        let project = ProjectConfig::load(&project_path)?;
        validate_identifier("organization_id", &project.organization_id)?;
        validate_identifier("project_id", &project.project_id)?;
        if !project.base_url.starts_with("http://") && !project.base_url.starts_with("https://") {
            return Err(Error::ConfigInvalid {
                path: project_path,
                message: format!("base_url must be an http(s) URL, got {:?}", project.base_url),
            });
        }

        let global = match self.global_config_path() {
            Some(path) => GlobalConfig::load(&path)?,
            None => GlobalConfig::default(),
        };
        let session = global.session_for(&project.base_url);

        Ok(ResolvedConfig {
            base_url: project.base_url,
            organization_id: project.organization_id,
            project_id: project.project_id,
            session_key: session.map(|s| s.session_key.clone()).unwrap_or_default(),
            expiration: session.and_then(|s| s.expiration),
        })
    }
}
