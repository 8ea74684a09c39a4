//! Error types for the sales inquiry client.
//!
//! # Design
//! Transport failures and non-2xx statuses share the `API request error`
//! prefix: the caller only logs them, so there is no reason to branch on
//! which side of the wire failed. Decode failures carry the `convert error`
//! prefix. `InputError` covers reading the SDC input document.

use std::path::PathBuf;

use thiserror::Error;

/// Errors produced while fetching and converting one step of a fetch path.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never produced a response (bad URL, connection refused,
    /// timeout).
    #[error("API request error: {0}")]
    Transport(String),

    /// The server answered with a non-2xx status.
    #[error("API request error: HTTP {status}: {body}")]
    HttpError { status: u16, body: String },

    /// The response body did not match the `{"d":{"results":[...]}}` envelope.
    #[error("convert error: {0}")]
    DeserializationError(String),

    /// A decoded batch could not be rendered as JSON for the reporter.
    #[error("serialization failed: {0}")]
    SerializationError(String),
}

/// Errors returned while loading an SDC input document.
#[derive(Debug, Error)]
pub enum InputError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
