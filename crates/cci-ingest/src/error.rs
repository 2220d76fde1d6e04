//! Error types for dataset and attribute ingestion.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while discovering files or reading their metadata.
#[derive(Debug, Error)]
pub enum IngestError {
    // === File System Errors ===
    /// Directory not found or not readable.
    #[error("directory not found: {path}")]
    DirectoryNotFound { path: PathBuf },

    /// Failed to read directory entries.
    #[error("failed to read directory {path}: {source}")]
    DirectoryRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to read file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // === Attribute Errors ===
    /// No attribute dump exists for a data file.
    #[error("no attribute sidecar for {path}")]
    MissingAttributes { path: PathBuf },

    /// The attribute dump could not be parsed.
    #[error("invalid attribute sidecar {path}: {message}")]
    AttributeFormat { path: PathBuf, message: String },
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;
