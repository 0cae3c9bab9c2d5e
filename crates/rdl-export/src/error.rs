//! Error types for rdl-export.

use std::path::PathBuf;

use thiserror::Error;

/// Errors from rendering or saving an export artifact.
#[derive(Debug, Error)]
pub enum ExportError {
    /// The renderer could not produce the artifact.
    #[error("Render failed: {0}")]
    Render(String),

    /// Writing the artifact to disk failed.
    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The artifact name would escape the output directory.
    #[error("Invalid artifact file name: {0}")]
    InvalidFileName(String),
}
