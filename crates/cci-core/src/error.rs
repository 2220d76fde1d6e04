//! Error types for the tagging core.

use std::path::PathBuf;

use thiserror::Error;

use cci_ingest::IngestError;
use cci_model::ModelError;
use cci_standards::StandardsError;

/// Fatal errors of a tagging run.
///
/// Per-file and per-dataset problems are not errors; they end up in the
/// run's `DiagnosticLog`.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error(transparent)]
    Ingest(#[from] IngestError),

    #[error(transparent)]
    Standards(#[from] StandardsError),

    #[error(transparent)]
    Model(#[from] ModelError),

    /// The identifier store could not be read or written.
    #[error("identifier store {path}: {source}")]
    StoreIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A line in the identifier store is not a `dataset,identifier` pair.
    #[error("identifier store {path}: {message}")]
    StoreFormat { path: PathBuf, message: String },
}

impl CoreError {
    pub(crate) fn store_format(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        CoreError::StoreFormat {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Result type for core operations.
pub type Result<T> = std::result::Result<T, CoreError>;
