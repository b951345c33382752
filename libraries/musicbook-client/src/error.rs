//! Error types for the Music Book client.

use thiserror::Error;

/// Errors that can occur when talking to the Music Book API.
#[derive(Error, Debug)]
pub enum ClientError {
    /// HTTP request failed in transit
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Server is offline or unreachable
    #[error("Server unreachable: {0}")]
    Unreachable(String),

    /// Server rejected the credential (401/403)
    #[error("Not authorized ({status}): {message}")]
    Unauthorized { status: u16, message: String },

    /// Server rejected the request payload (400/422)
    #[error("Rejected by server ({status}): {message}")]
    Validation { status: u16, message: String },

    /// Server returned any other error response
    #[error("Server error ({status}): {message}")]
    Server { status: u16, message: String },

    /// Failed to parse server response
    #[error("Failed to parse response: {0}")]
    Parse(String),

    /// Invalid base URL
    #[error("Invalid server URL: {0}")]
    InvalidUrl(String),

    /// Credential store could not be read or written
    #[error("Credential storage error: {0}")]
    Storage(#[from] std::io::Error),
}

/// Coarse classification of a [`ClientError`], so callers can react by kind
/// instead of by variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The request never produced an HTTP response
    Network,
    /// The credential is missing, expired or rejected
    Auth,
    /// The request itself was malformed or refused as invalid
    Validation,
    /// The server (or the local store) failed
    Server,
}

impl ClientError {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            ClientError::Request(_) | ClientError::Unreachable(_) => ErrorKind::Network,
            ClientError::Unauthorized { .. } => ErrorKind::Auth,
            ClientError::Validation { .. } | ClientError::InvalidUrl(_) => ErrorKind::Validation,
            ClientError::Server { .. } | ClientError::Parse(_) | ClientError::Storage(_) => {
                ErrorKind::Server
            }
        }
    }

    /// True when the backend refused the credential.
    pub fn is_auth(&self) -> bool {
        self.kind() == ErrorKind::Auth
    }

    /// Map a non-success status and its body to the matching variant.
    pub(crate) fn from_status(status: u16, message: String) -> Self {
        match status {
            401 | 403 => ClientError::Unauthorized { status, message },
            400 | 422 => ClientError::Validation { status, message },
            _ => ClientError::Server { status, message },
        }
    }

    /// Map a transport error, separating "could not connect" from the rest.
    pub(crate) fn from_transport(err: reqwest::Error) -> Self {
        if err.is_connect() || err.is_timeout() {
            ClientError::Unreachable(err.to_string())
        } else {
            ClientError::Request(err)
        }
    }
}

/// Result type for client operations.
pub type Result<T> = std::result::Result<T, ClientError>;
