//! Credential acquisition capability
//!
//! Session keys are short-lived browser cookies; how they are obtained
//! (config file, environment, prompt) is a bootstrap concern kept out
//! of the sync core. The core only sees this trait.

use crate::{Error, Result};

/// Instructions shown when no valid session key is available.
pub const SESSION_KEY_HELP: &str = "\
Session key is missing or expired. To obtain a new one:
  1. Open the document store in your browser and sign in
  2. Open DevTools (F12) and go to the Network tab
  3. Select any API request and find the `sessionKey` cookie
  4. Store its value with the expiry in the global docsync config";

/// Provides the session key used to authenticate remote calls.
pub trait CredentialProvider {
    /// The current session key, or [`Error::Auth`] with remediation
    /// instructions when none is available.
    fn session_key(&self) -> Result<String>;
}

/// A fixed in-memory session key, for tests and scripted use.
#[derive(Debug, Clone)]
pub struct StaticCredentials(pub String);

impl CredentialProvider for StaticCredentials {
    fn session_key(&self) -> Result<String> {
        if self.0.is_empty() {
            return Err(Error::auth(SESSION_KEY_HELP));
        }
        Ok(self.0.clone())
    }
}
