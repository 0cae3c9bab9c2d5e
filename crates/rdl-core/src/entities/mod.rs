//! Entity structs for all Redline domain objects.
//!
//! All structs derive `Serialize`, `Deserialize`, and `JsonSchema` so they can
//! be persisted in the state file, written to the review trail, and validated
//! against their generated schema.

mod checklist;
mod comment;
mod project;

pub use checklist::{ChecklistCategory, ChecklistItem};
pub use comment::Comment;
pub use project::{Project, ProjectCandidate};
