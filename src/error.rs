use std::path::PathBuf;
use std::sync::Arc;

use thiserror::Error;

// ---------------------------------------------------------------------------
// Error taxonomy
// ---------------------------------------------------------------------------

/// The service-account credential is missing or unusable. `Clone` so a
/// failure found at startup can be reported again on every load attempt.
#[derive(Debug, Clone, Error)]
pub enum CredentialError {
    #[error("no service account key configured (set --credentials or GOOGLE_APPLICATION_CREDENTIALS)")]
    Missing,

    #[error("cannot read service account key {path}")]
    Unreadable {
        path: PathBuf,
        #[source]
        source: Arc<std::io::Error>,
    },

    #[error("service account key is not valid JSON")]
    Malformed(#[source] Arc<serde_json::Error>),

    #[error("expected a key of type \"service_account\", got \"{0}\"")]
    WrongType(String),

    #[error("service account key has an empty '{0}' field")]
    MissingField(&'static str),

    #[error("invalid private key: {0}")]
    InvalidKey(String),

    #[error("failed to sign the token request")]
    Signing,
}

/// The remote document or sheet could not be reached or read.
#[derive(Debug, Error)]
pub enum RemoteAccessError {
    #[error("'{0}' is not a spreadsheet URL or ID")]
    InvalidLocator(String),

    #[error("spreadsheet {0} not found")]
    DocumentNotFound(String),

    #[error("worksheet '{sheet}' not found in spreadsheet {document}")]
    SheetNotFound { document: String, sheet: String },

    #[error("not authorized: {0}")]
    Unauthorized(String),

    #[error("request failed with HTTP {status}: {message}")]
    Status { status: u16, message: String },

    #[error("request to {url} failed")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("unexpected response from {url}")]
    MalformedResponse {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("worksheet header is not unique: '{0}' appears more than once")]
    MalformedSheet(String),
}

/// Outcome of a sheet load.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error(transparent)]
    Credential(#[from] CredentialError),

    #[error(transparent)]
    RemoteAccess(#[from] RemoteAccessError),
}

impl LoadError {
    pub fn is_credential(&self) -> bool {
        matches!(self, LoadError::Credential(_))
    }

    pub fn is_remote(&self) -> bool {
        matches!(self, LoadError::RemoteAccess(_))
    }
}

/// Min/max was requested over a table with no rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("the property table is empty")]
pub struct EmptyDatasetError;

/// Render an error with its full `source()` chain, one cause per line.
pub fn error_chain(err: &dyn std::error::Error) -> String {
    let mut out = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        out.push_str("\n  caused by: ");
        out.push_str(&cause.to_string());
        source = cause.source();
    }
    out
}
