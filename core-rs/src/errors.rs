//! Error types for the Units core

use thiserror::Error;

#[derive(Error, Debug)]
pub enum UnitsError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid language filter: {0}")]
    InvalidFilter(String),

    #[error("Invalid IRI: {0}")]
    InvalidIri(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("SPARQL endpoint returned status {status}: {body}")]
    UpstreamStatus { status: u16, body: String },

    #[error("SPARQL request failed: {0}")]
    UpstreamTransport(#[from] reqwest::Error),

    #[error("Malformed SPARQL response: {0}")]
    MalformedResponse(String),

    #[error("Local dataset error: {0}")]
    LocalStore(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl UnitsError {
    /// True when the failure came from the query-execution collaborator.
    ///
    /// An upstream failure means "unknown", never "no matching data", so
    /// callers must not fold it into an empty result.
    pub fn is_upstream(&self) -> bool {
        matches!(
            self,
            UnitsError::UpstreamStatus { .. }
                | UnitsError::UpstreamTransport(_)
                | UnitsError::MalformedResponse(_)
                | UnitsError::LocalStore(_)
        )
    }

    /// True when the caller sent something unusable (bad filter, IRI or parameter).
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            UnitsError::InvalidFilter(_) | UnitsError::InvalidIri(_) | UnitsError::InvalidRequest(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, UnitsError>;
