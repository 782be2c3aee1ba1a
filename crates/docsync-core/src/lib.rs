//! Sync decision engine for docsync
//!
//! This crate coordinates the local filesystem layer and the remote
//! store into a one-directional synchronizer:
//!
//! - **Configuration resolution**: merge of the user-wide credential
//!   file and the per-project config into one explicit struct
//! - **Reconciliation**: diff of the local snapshot against the remote
//!   listing into a [`SyncPlan`] of upload / replace / skip actions
//!   plus a deletion set
//! - **Execution**: [`SyncEngine`] applies a plan against the remote
//!   store with per-file fault isolation and a [`SyncSummary`]
//!
//! # Architecture
//!
//! ```text
//!          docsync-cli
//!               |
//!          docsync-core
//!           |        |
//!      docsync-fs  docsync-remote
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod init;
pub mod plan;

pub use config::{ConfigResolver, GlobalConfig, ProjectConfig, ResolvedConfig, SessionEntry};
pub use engine::{SyncEngine, SyncOptions, SyncSummary};
pub use error::{Error, Result};
pub use init::{
    DEFAULT_IGNORE_RULES, IGNORE_FILE_NAME, extension_summary, write_default_ignore,
    write_default_project_config,
};
pub use plan::{DeleteEntry, SyncAction, SyncPlan, reconcile};
