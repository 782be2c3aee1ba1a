//! Error types for docsync-remote

/// Result type for docsync-remote operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur when talking to the remote document store
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Invalid or expired credentials. Fatal in the planning phase;
    /// the message carries remediation instructions.
    #[error("Authentication failed: {message}")]
    Auth { message: String },

    /// Unknown organization, project, or document identifier.
    #[error("Not found: {message}")]
    NotFound { message: String },

    /// The server rejected the uploaded payload.
    #[error("Validation failed: {message}")]
    Validation { message: String },

    /// Network or HTTP-level failure on a single operation.
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Any other non-success response from the server.
    #[error("Server error ({status}): {message}")]
    Api { status: u16, message: String },
}

impl Error {
    pub fn auth(message: impl Into<String>) -> Self {
        Self::Auth {
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }
}
