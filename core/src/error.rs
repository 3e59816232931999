//! Error types for the REST client.
//!
//! # Design
//! Each failure stage gets its own variant so callers can tell "the server
//! was unreachable" (`Transport`) from "the server rejected the request"
//! (`Api`, `UnexpectedStatus`) and from local problems (`Credentials`,
//! `Serialize`, `Decode`). Transport and credential failures wrap arbitrary
//! boxed errors because both collaborators are pluggable.

use thiserror::Error;

use crate::types::ApiError;

/// Boxed error used by pluggable collaborators.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Result alias using the crate [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Errors returned by the terminal `recv*` operations.
#[derive(Debug, Error)]
pub enum Error {
    /// The HTTP exchange itself failed: DNS, refused connection, timeout,
    /// malformed response.
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// The credential provider could not produce headers. No request was sent.
    #[error("credential provider failed: {0}")]
    Credentials(#[from] CredentialError),

    /// Non-2xx response carrying the structured error body.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// Non-2xx response whose body is not the structured error schema.
    /// `body` holds at most the first 256 characters.
    #[error("unexpected status {status}: {body}")]
    UnexpectedStatus { status: u16, body: String },

    /// 2xx response whose body does not match the requested type.
    #[error("failed to decode response body: {0}")]
    Decode(#[source] serde_json::Error),

    /// The payload given to `send` could not be encoded as JSON.
    #[error("failed to serialize request body: {0}")]
    Serialize(#[source] serde_json::Error),
}

impl Error {
    /// The structured API error, if the server returned one.
    pub fn api(&self) -> Option<&ApiError> {
        match self {
            Error::Api(err) => Some(err),
            _ => None,
        }
    }
}

/// Failure reported by a [`Transport`](crate::transport::Transport).
#[derive(Debug, Error)]
#[error("{message}")]
pub struct TransportError {
    message: String,
    #[source]
    source: Option<BoxError>,
}

impl TransportError {
    pub fn new(source: impl Into<BoxError>) -> Self {
        let source = source.into();
        Self {
            message: source.to_string(),
            source: Some(source),
        }
    }

    pub fn msg(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }
}

/// Failure reported by a [`CredentialProvider`](crate::auth::CredentialProvider).
#[derive(Debug, Error)]
#[error("{message}")]
pub struct CredentialError {
    message: String,
    #[source]
    source: Option<BoxError>,
}

impl CredentialError {
    pub fn new(source: impl Into<BoxError>) -> Self {
        let source = source.into();
        Self {
            message: source.to_string(),
            source: Some(source),
        }
    }

    pub fn msg(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }
}
