//! Rendered export files and the traits that produce and store them.

use std::path::PathBuf;

use rdl_core::enums::ExportFormat;
use rdl_core::export::ExportTable;
use serde::Serialize;

use crate::error::ExportError;

/// A rendered export, ready to be written somewhere.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Artifact {
    pub file_name: String,
    pub media_type: String,
    #[serde(skip)]
    pub bytes: Vec<u8>,
}

/// Turns an export table into a file.
pub trait ArtifactRenderer {
    fn format(&self) -> ExportFormat;

    /// # Errors
    ///
    /// Returns `ExportError::Render` if the table cannot be encoded.
    fn render(&self, table: &ExportTable) -> Result<Artifact, ExportError>;
}

/// Stores a rendered artifact and reports where it went.
pub trait ArtifactSink {
    /// # Errors
    ///
    /// Returns `ExportError` if the artifact cannot be stored.
    fn save(&self, artifact: &Artifact) -> Result<PathBuf, ExportError>;
}

/// `review-<code>.<ext>`
#[must_use]
pub fn artifact_file_name(table: &ExportTable, extension: &str) -> String {
    format!("review-{}.{extension}", table.project_code)
}
