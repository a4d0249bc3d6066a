//! Error types for Mail Triage.
//!
//! Structured error handling with stable error codes for machine parsing
//! and category classification for error grouping. Input errors are
//! per-item and never abort a batch run; model-state errors carry a clear
//! name instead of surfacing as a generic lookup failure.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for Mail Triage operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error categories for grouping related errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// Message parsing and corpus loading errors.
    Input,
    /// Classifier state errors (untrained model, unseen label).
    Model,
    /// File I/O and serialization errors.
    Io,
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorCategory::Input => write!(f, "input"),
            ErrorCategory::Model => write!(f, "model"),
            ErrorCategory::Io => write!(f, "io"),
        }
    }
}

/// Unified error type for Mail Triage.
#[derive(Error, Debug)]
pub enum Error {
    // Input errors (10-19)
    #[error("malformed message file '{file_name}': {reason}")]
    MalformedMessage { file_name: String, reason: String },

    #[error("corpus error: {0}")]
    Corpus(String),

    #[error("corpus at '{0}' contains no usable messages")]
    EmptyCorpus(String),

    // Model-state errors (20-29)
    #[error("model not ready: {0}")]
    ModelNotReady(String),

    #[error("unknown label '{label}': not seen during training")]
    UnknownLabel { label: String },

    // I/O errors (30-39)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Returns the stable error code for this error type.
    ///
    /// Error codes are grouped by category:
    /// - 10-19: Input errors
    /// - 20-29: Model-state errors
    /// - 30-39: I/O errors
    pub fn code(&self) -> u32 {
        match self {
            Error::MalformedMessage { .. } => 10,
            Error::Corpus(_) => 11,
            Error::EmptyCorpus(_) => 12,
            Error::ModelNotReady(_) => 20,
            Error::UnknownLabel { .. } => 21,
            Error::Io(_) => 30,
            Error::Json(_) => 31,
        }
    }

    /// Returns the error category for grouping and filtering.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Error::MalformedMessage { .. } | Error::Corpus(_) | Error::EmptyCorpus(_) => {
                ErrorCategory::Input
            }
            Error::ModelNotReady(_) | Error::UnknownLabel { .. } => ErrorCategory::Model,
            Error::Io(_) | Error::Json(_) => ErrorCategory::Io,
        }
    }

    /// Returns whether processing may continue past this error.
    ///
    /// Input errors exclude a single item from a run; model and I/O errors
    /// stop the run.
    pub fn is_per_item(&self) -> bool {
        matches!(self, Error::MalformedMessage { .. })
    }
}
