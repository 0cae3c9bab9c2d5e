//! # rdl-export
//!
//! Renders a finalized review table into a downloadable file and writes it
//! to disk.
//!
//! - [`SpreadsheetRenderer`]: CSV with Korean headers, opened by any
//!   spreadsheet tool
//! - [`ReportRenderer`]: print-ready HTML, the source for the PDF export
//! - [`FileSink`]: saves artifacts as `review-<code>.<ext>`

pub mod artifact;
pub mod error;
pub mod report;
pub mod sink;
pub mod spreadsheet;

use rdl_core::enums::ExportFormat;

pub use artifact::{Artifact, ArtifactRenderer, ArtifactSink, artifact_file_name};
pub use error::ExportError;
pub use report::ReportRenderer;
pub use sink::FileSink;
pub use spreadsheet::SpreadsheetRenderer;

/// The renderer that produces `format`.
#[must_use]
pub fn renderer_for(format: ExportFormat) -> Box<dyn ArtifactRenderer> {
    match format {
        ExportFormat::Pdf => Box::new(ReportRenderer),
        ExportFormat::Spreadsheet => Box::new(SpreadsheetRenderer),
    }
}
