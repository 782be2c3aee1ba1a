//! Shared test utilities for the docsync workspace.
//!
//! This crate provides standardised fixtures to eliminate duplication
//! across crate test suites. It is a dev-dependency only and is never
//! published.
//!
//! - [`ScriptedStore`]: in-memory [`RemoteStore`](docsync_remote::RemoteStore)
//!   that records call order and can be scripted to fail specific
//!   operations
//! - [`TempProject`]: temp-directory project builder with controlled
//!   file mtimes

pub mod project;
pub mod store;

pub use project::TempProject;
pub use store::{ScriptedStore, StoreCall};
