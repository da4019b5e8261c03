//! Error types for manifest export operations.

use thiserror::Error;

/// Main error type for manifest generation operations.
#[derive(Debug, Error)]
pub enum ExportError {
    /// Filesystem read/delete failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Settings or site-export JSON is malformed
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// A requested output file name is not one of the two known manifests
    #[error("unknown output file: {0} (expected llms.txt or llms-full.txt)")]
    UnknownOutputFile(String),

    /// Writing a manifest file failed
    #[error("writing {file} failed: {source}")]
    Write {
        file: String,
        #[source]
        source: std::io::Error,
    },
}

/// Type alias for Result with ExportError
pub type Result<T> = std::result::Result<T, ExportError>;
