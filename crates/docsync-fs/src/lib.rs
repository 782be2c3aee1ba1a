//! Local filesystem layer for docsync
//!
//! This crate owns the two purely-local concerns of the synchronizer:
//!
//! - **Ignore rules**: an ordered, gitignore-flavored rule list compiled
//!   into a match predicate over relative paths ([`IgnoreRules`])
//! - **Scanning**: a recursive directory walk producing the local file
//!   snapshot consumed by reconciliation ([`scan`])
//!
//! Everything here is deterministic and does no network I/O.

pub mod error;
pub mod ignore;
pub mod scan;

pub use error::{Error, Result};
pub use ignore::{IgnoreRule, IgnoreRules};
pub use scan::{LocalSnapshot, scan};
