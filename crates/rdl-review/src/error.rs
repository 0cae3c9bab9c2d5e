//! Error types for review sessions and the project registry.

use rdl_core::errors::CoreError;
use thiserror::Error;

/// Errors from review and registry operations.
///
/// Guard rejections (blank comments, finalize before every item is checked,
/// edits on a finished review) are not errors; they come back as
/// [`crate::Outcome::Ignored`].
#[derive(Debug, Error)]
pub enum ReviewError {
    /// No checklist item at the given position.
    #[error("No checklist item at category {category}, item {item}")]
    ItemNotFound { category: usize, item: usize },

    /// The registry has no project with this id.
    #[error("Project not found: {0}")]
    ProjectNotFound(u32),

    /// The intake catalog has no candidate with this key.
    #[error("Project candidate not found: {0}")]
    CandidateNotFound(String),

    /// Rendering or saving an export artifact failed.
    #[error(transparent)]
    Export(#[from] rdl_export::ExportError),

    /// Reading or writing persisted state failed.
    #[error("State file error: {0}")]
    State(String),

    #[error(transparent)]
    Core(#[from] CoreError),
}
