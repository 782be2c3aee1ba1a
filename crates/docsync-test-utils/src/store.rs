//! Scripted in-memory remote store
//!
//! Records every call in order (for ordering assertions) and mutates
//! an in-memory document table so multi-run scenarios behave like a
//! real store. Specific paths or ids can be scripted to fail.

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use chrono::Utc;
use docsync_remote::{Error, RemoteFileRecord, RemoteStore, Result};

/// One observed store call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreCall {
    List,
    Upload { relative_path: String },
    Delete { remote_id: String },
}

#[derive(Debug, Default)]
struct Inner {
    docs: Vec<RemoteFileRecord>,
    calls: Vec<StoreCall>,
    fail_uploads: HashSet<String>,
    fail_deletes: HashSet<String>,
    next_id: u64,
}

/// In-memory [`RemoteStore`] with shared interior, so a test can keep
/// a handle for inspection after boxing another into the engine.
#[derive(Debug, Clone, Default)]
pub struct ScriptedStore {
    inner: Arc<Mutex<Inner>>,
}

impl ScriptedStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A second handle onto the same store.
    pub fn handle(&self) -> Self {
        self.clone()
    }

    /// Seed a remote document.
    pub fn push_doc(&self, remote_id: &str, relative_path: &str, updated_at: &str) {
        self.inner.lock().unwrap().docs.push(RemoteFileRecord {
            remote_id: remote_id.into(),
            relative_path: relative_path.into(),
            updated_at: updated_at.into(),
        });
    }

    /// Script the next uploads of `relative_path` to fail.
    pub fn fail_upload(&self, relative_path: &str) {
        self.inner
            .lock()
            .unwrap()
            .fail_uploads
            .insert(relative_path.into());
    }

    /// Script deletions of `remote_id` to fail.
    pub fn fail_delete(&self, remote_id: &str) {
        self.inner
            .lock()
            .unwrap()
            .fail_deletes
            .insert(remote_id.into());
    }

    /// All calls observed so far, in order.
    pub fn calls(&self) -> Vec<StoreCall> {
        self.inner.lock().unwrap().calls.clone()
    }

    /// Current remote documents.
    pub fn docs(&self) -> Vec<RemoteFileRecord> {
        self.inner.lock().unwrap().docs.clone()
    }
}

impl RemoteStore for ScriptedStore {
    fn list(&self) -> Result<Vec<RemoteFileRecord>> {
        let mut inner = self.inner.lock().unwrap();
        inner.calls.push(StoreCall::List);
        Ok(inner.docs.clone())
    }

    fn upload(&self, relative_path: &str, _content: &str) -> Result<String> {
        let mut inner = self.inner.lock().unwrap();
        inner.calls.push(StoreCall::Upload {
            relative_path: relative_path.into(),
        });
        if inner.fail_uploads.contains(relative_path) {
            return Err(Error::Api {
                status: 500,
                message: format!("scripted upload failure for {relative_path}"),
            });
        }
        inner.next_id += 1;
        let remote_id = format!("doc-{}", inner.next_id);
        let record = RemoteFileRecord {
            remote_id: remote_id.clone(),
            relative_path: relative_path.into(),
            updated_at: Utc::now().to_rfc3339(),
        };
        inner.docs.push(record);
        Ok(remote_id)
    }

    fn delete(&self, remote_id: &str) -> Result<()> {
        let mut inner = self.inner.lock().unwrap();
        inner.calls.push(StoreCall::Delete {
            remote_id: remote_id.into(),
        });
        if inner.fail_deletes.contains(remote_id) {
            return Err(Error::Api {
                status: 500,
                message: format!("scripted delete failure for {remote_id}"),
            });
        }
        let before = inner.docs.len();
        inner.docs.retain(|doc| doc.remote_id != remote_id);
        if inner.docs.len() == before {
            return Err(Error::not_found(format!(
                "document {remote_id} does not exist on the remote"
            )));
        }
        Ok(())
    }
}
