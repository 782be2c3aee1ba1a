//! Remote document-store interface for docsync
//!
//! Defines the [`RemoteStore`] capability the sync core is written
//! against, the snapshot record type it returns, and the HTTP
//! implementation talking to the document-store API. Credentials are
//! abstracted behind [`CredentialProvider`] so the core never touches
//! session acquisition directly.

pub mod credentials;
pub mod error;
pub mod http;
pub mod store;

pub use credentials::{CredentialProvider, StaticCredentials};
pub use error::{Error, Result};
pub use http::{HttpRemoteStore, StoreConfig};
pub use store::{RemoteFileRecord, RemoteStore};
