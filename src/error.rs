//! Error types for the doc-converter client.
//!
//! Every failure is terminal for the current attempt: nothing is retried
//! automatically. The UI surfaces [`ConvertError`]'s `Display` output
//! verbatim in its error view, so the messages here are written for end
//! users rather than for logs.

use std::path::PathBuf;
use thiserror::Error;

/// All errors returned by the conversion client and the UI orchestrator.
#[derive(Debug, Error)]
pub enum ConvertError {
    // ── Local validation ──────────────────────────────────────────────────
    /// Input was rejected before any network call was made.
    #[error("{0}")]
    InvalidRequest(String),

    // ── API errors ────────────────────────────────────────────────────────
    /// The API answered with a non-success status.
    ///
    /// `message` is the server-provided `detail` when present, otherwise a
    /// per-operation default such as `Failed to convert HTML to PDF`.
    #[error("{message}")]
    Api {
        status: Option<u16>,
        message: String,
    },

    /// The request could not be sent or the response body could not be read.
    #[error("Could not reach the conversion API: {0}")]
    Transport(#[from] reqwest::Error),

    // ── Config errors ─────────────────────────────────────────────────────
    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // ── I/O errors ────────────────────────────────────────────────────────
    /// Reading an upload from disk failed.
    #[error("Failed to read input file '{path}': {source}")]
    InputReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Could not create or write the downloaded result.
    #[error("Failed to write output file '{path}': {source}")]
    OutputWriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ConvertError {
    /// Shorthand for an [`ConvertError::Api`] built from a status code.
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        ConvertError::Api {
            status: Some(status),
            message: message.into(),
        }
    }

    /// HTTP status attached to an API error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            ConvertError::Api { status, .. } => *status,
            ConvertError::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}
