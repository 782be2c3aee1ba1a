//! The remote store capability consumed by the sync core

use crate::Result;

/// Snapshot of one remote document, as returned by [`RemoteStore::list`].
///
/// `updated_at` is kept as the raw server string (RFC 3339 expected):
/// parsing happens at reconciliation time so that a malformed value
/// degrades to "needs sync" for that one file instead of aborting the
/// whole listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteFileRecord {
    /// Opaque server-side identifier, used for replace and delete.
    pub remote_id: String,
    /// Relative path of the local counterpart. Recovered from remote
    /// metadata when present, else the stored file name.
    pub relative_path: String,
    /// Last-updated timestamp as reported by the server.
    pub updated_at: String,
}

/// Document-store operations the synchronizer depends on.
///
/// One blocking round-trip per call; implementations are driven
/// sequentially, one call in flight at a time.
pub trait RemoteStore {
    /// List all documents in the project.
    fn list(&self) -> Result<Vec<RemoteFileRecord>>;

    /// Upload a document, returning its new remote id.
    fn upload(&self, relative_path: &str, content: &str) -> Result<String>;

    /// Delete a document by remote id.
    ///
    /// Deleting an already-absent document fails with
    /// [`Error::NotFound`](crate::Error::NotFound); callers surface it
    /// as a per-item failure.
    fn delete(&self, remote_id: &str) -> Result<()>;
}
