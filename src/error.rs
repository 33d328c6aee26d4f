//! Error types for plotctl.
//!
//! This module provides a unified error handling approach using `thiserror`.

use std::path::PathBuf;
use thiserror::Error;

use crate::label::LabelError;

/// Result type alias for plotctl operations.
pub type Result<T> = std::result::Result<T, PlotctlError>;

/// Errors that can occur in plotctl.
#[derive(Debug, Error)]
pub enum PlotctlError {
    /// Failed to open a file.
    #[error("Failed to open file: {path}")]
    FileOpen {
        /// Path that could not be opened.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// Transport failure talking to the render service.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The render service answered with a non-success status.
    #[error("Render service returned {status}: {message}")]
    Server {
        /// HTTP status code.
        status: u16,
        /// Error text reported by the service.
        message: String,
    },

    /// JSON encoding or decoding failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The drawing program returned by the service is malformed.
    #[error("Invalid drawing program: {0}")]
    Drawing(String),

    /// An entry label could not be decoded.
    #[error(transparent)]
    Label(#[from] LabelError),

    /// Entry index out of range.
    #[error("Entry not found: #{index}")]
    EntryNotFound {
        /// 1-based entry index.
        index: usize,
    },

    /// Failed to access clipboard.
    #[error("Clipboard error: {0}")]
    Clipboard(#[from] arboard::Error),
}

impl PlotctlError {
    /// Create a FileOpen error.
    pub fn file_open(path: PathBuf, source: std::io::Error) -> Self {
        Self::FileOpen { path, source }
    }

    /// Create a Server error.
    pub fn server(status: u16, message: impl Into<String>) -> Self {
        Self::Server {
            status,
            message: message.into(),
        }
    }

    /// Create a Drawing error.
    pub fn drawing(message: impl Into<String>) -> Self {
        Self::Drawing(message.into())
    }

    /// Create an EntryNotFound error.
    pub fn entry_not_found(index: usize) -> Self {
        Self::EntryNotFound { index }
    }
}
