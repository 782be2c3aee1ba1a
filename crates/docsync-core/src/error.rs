//! Error types for docsync-core

use std::path::PathBuf;

/// Result type for docsync-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in docsync-core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Project configuration file is missing
    #[error("Project configuration not found at {path}; run `docsync init` first")]
    ConfigNotFound { path: PathBuf },

    /// Configuration file exists but cannot be parsed
    #[error("Invalid configuration at {path}: {message}")]
    ConfigInvalid { path: PathBuf, message: String },

    /// A required identifier is missing or malformed
    #[error("Invalid {field}: {value:?}")]
    InvalidIdentifier { field: &'static str, value: String },

    /// Filesystem error from docsync-fs
    #[error(transparent)]
    Fs(#[from] docsync_fs::Error),

    /// Remote store error from docsync-remote
    #[error(transparent)]
    Remote(#[from] docsync_remote::Error),

    /// Standard I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
