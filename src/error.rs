use std::path::PathBuf;

use reqwest::StatusCode;
use thiserror::Error;

/// Failure reasons of the store and forward operations.
///
/// The fire-and-forget wrappers (`store_record`, `send_data`) only log these;
/// the inner operations return them so callers can branch on the outcome.
#[derive(Debug, Error)]
pub enum RelayError {
    #[error("Error reading file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Error parsing JSON from file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("file {} does not contain a JSON array", path.display())]
    NotAnArray { path: PathBuf },

    #[error("record is not JSON-serializable: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error("Error writing file {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Environment variables {url_var} and {key_var} are required")]
    MissingConfig {
        url_var: &'static str,
        key_var: &'static str,
    },

    #[error("forward url and key are required: set {hint}")]
    MissingEndpoint { hint: &'static str },

    #[error("invalid auth header '{0}'")]
    InvalidHeader(String),

    #[error("auth key is not a valid header value")]
    InvalidKey,

    #[error("{} - {reason}", status.as_u16())]
    Status { status: StatusCode, reason: String },

    #[error("{0}")]
    Transport(#[from] reqwest::Error),

    #[error("store writer for {} is closed", path.display())]
    WriterClosed { path: PathBuf },
}

pub type Result<T> = std::result::Result<T, RelayError>;
