//! Hub client errors.

use promptsync_core::AppError;
use thiserror::Error;

/// Errors raised while talking to a prompt hub.
///
/// Transport and decode failures keep their underlying `reqwest` error as the
/// source so callers can print the whole chain.
#[derive(Error, Debug)]
pub enum HubError {
    #[error("invalid prompt identifier '{0}': expected 'owner/name' or 'name'")]
    InvalidIdentifier(String),

    #[error("failed to build HTTP client")]
    Client(#[source] reqwest::Error),

    #[error("request to {url} failed")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("hub returned {status} for {url}: {body}")]
    Status { url: String, status: u16, body: String },

    #[error("prompt '{0}' not found on the hub")]
    NotFound(String),

    #[error("failed to decode hub response from {url}")]
    Decode {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("invalid prompt manifest: {0}")]
    Manifest(String),

    #[error("unrecognized message role '{0}'")]
    UnknownRole(String),
}

pub type HubResult<T> = Result<T, HubError>;

impl From<HubError> for AppError {
    fn from(err: HubError) -> Self {
        AppError::Hub(err.to_string())
    }
}
