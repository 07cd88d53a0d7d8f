//! Infrastructure errors

use crate::domain::error::BankerError;
use std::path::PathBuf;

/// Failures while reading, writing or encoding documents
#[derive(Debug, thiserror::Error)]
pub enum InfraError {
    /// File could not be read or written
    #[error("I/O error on {path}: {source}")]
    Io {
        /// File involved
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Document is not valid JSON for the expected type
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Document parsed but describes an invalid scenario or state
    #[error(transparent)]
    Domain(#[from] BankerError),
}

impl InfraError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
