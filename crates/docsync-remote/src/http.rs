//! HTTP implementation of [`RemoteStore`]
//!
//! Talks to the document-store REST API:
//!
//! - `GET    {base}/api/organizations/{org}/projects/{project}/docs`
//! - `POST   {base}/api/organizations/{org}/projects/{project}/docs`
//! - `DELETE {base}/api/organizations/{org}/projects/{project}/docs/{id}`
//!
//! Authentication is a `sessionKey` cookie. All calls are blocking
//! round-trips; the executor drives them one at a time.

use reqwest::StatusCode;
use reqwest::blocking::{Client, Response};
use reqwest::header::COOKIE;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::credentials::{CredentialProvider, SESSION_KEY_HELP};
use crate::{Error, RemoteFileRecord, RemoteStore, Result};

/// Connection parameters for the document-store API.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    pub base_url: String,
    pub organization_id: String,
    pub project_id: String,
}

/// Blocking HTTP client for the document store.
pub struct HttpRemoteStore {
    http: Client,
    config: StoreConfig,
    session_key: String,
}

/// One document as returned by the list endpoint.
#[derive(Debug, Deserialize)]
struct RemoteDoc {
    uuid: String,
    file_name: String,
    #[serde(default)]
    created_at: Option<String>,
    #[serde(default)]
    updated_at: Option<String>,
    #[serde(default)]
    metadata: Option<DocMetadata>,
}

#[derive(Debug, Default, Deserialize)]
struct DocMetadata {
    #[serde(default)]
    local_path: Option<String>,
}

impl From<RemoteDoc> for RemoteFileRecord {
    fn from(doc: RemoteDoc) -> Self {
        // Prefer the local path recorded in metadata; fall back to the
        // stored file name. Missing updated_at falls back to created_at
        // (an empty string then parses as "needs sync" downstream).
        let relative_path = doc
            .metadata
            .and_then(|m| m.local_path)
            .unwrap_or_else(|| doc.file_name.clone());
        Self {
            remote_id: doc.uuid,
            relative_path,
            updated_at: doc.updated_at.or(doc.created_at).unwrap_or_default(),
        }
    }
}

#[derive(Debug, Serialize)]
struct UploadRequest<'a> {
    file_name: &'a str,
    content: &'a str,
    project_uuid: &'a str,
}

#[derive(Debug, Deserialize)]
struct UploadResponse {
    uuid: String,
}

#[derive(Debug, Serialize)]
struct DeleteRequest<'a> {
    #[serde(rename = "docUuid")]
    doc_uuid: &'a str,
}

impl HttpRemoteStore {
    /// Build a store client, resolving the session key up front so an
    /// expired credential fails before any file operation.
    pub fn new(config: StoreConfig, credentials: &dyn CredentialProvider) -> Result<Self> {
        let session_key = credentials.session_key()?;
        let http = Client::builder()
            .user_agent(concat!("docsync/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            http,
            config,
            session_key,
        })
    }

    fn docs_url(&self) -> String {
        format!(
            "{}/api/organizations/{}/projects/{}/docs",
            self.config.base_url.trim_end_matches('/'),
            self.config.organization_id,
            self.config.project_id
        )
    }

    fn cookie(&self) -> String {
        format!("sessionKey={}", self.session_key)
    }

    fn status_error(&self, response: Response, not_found: String) -> Error {
        let status = response.status();
        let message = response.text().unwrap_or_default();
        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Error::auth(SESSION_KEY_HELP),
            StatusCode::NOT_FOUND => Error::not_found(not_found),
            StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
                Error::Validation { message }
            }
            _ => Error::Api {
                status: status.as_u16(),
                message,
            },
        }
    }

    fn unknown_project(&self) -> String {
        format!(
            "organization {} or project {} not found",
            self.config.organization_id, self.config.project_id
        )
    }
}

impl RemoteStore for HttpRemoteStore {
    fn list(&self) -> Result<Vec<RemoteFileRecord>> {
        let url = self.docs_url();
        debug!(url = %url, "listing remote documents");

        let response = self.http.get(&url).header(COOKIE, self.cookie()).send()?;
        if !response.status().is_success() {
            return Err(self.status_error(response, self.unknown_project()));
        }

        let docs: Vec<RemoteDoc> = response.json()?;
        debug!(count = docs.len(), "listed remote documents");
        Ok(docs.into_iter().map(Into::into).collect())
    }

    fn upload(&self, relative_path: &str, content: &str) -> Result<String> {
        let url = self.docs_url();
        debug!(url = %url, path = relative_path, "uploading document");

        let body = UploadRequest {
            // Full relative path as the stored name preserves the tree
            // structure on the flat remote namespace.
            file_name: relative_path,
            content,
            project_uuid: &self.config.project_id,
        };
        let response = self
            .http
            .post(&url)
            .header(COOKIE, self.cookie())
            .json(&body)
            .send()?;
        if !response.status().is_success() {
            return Err(self.status_error(response, self.unknown_project()));
        }

        let uploaded: UploadResponse = response.json()?;
        Ok(uploaded.uuid)
    }

    fn delete(&self, remote_id: &str) -> Result<()> {
        let url = format!("{}/{}", self.docs_url(), remote_id);
        debug!(url = %url, "deleting document");

        let response = self
            .http
            .delete(&url)
            .header(COOKIE, self.cookie())
            .json(&DeleteRequest {
                doc_uuid: remote_id,
            })
            .send()?;
        if !response.status().is_success() {
            let not_found = format!("document {remote_id} does not exist on the remote");
            return Err(self.status_error(response, not_found));
        }
        Ok(())
    }
}
