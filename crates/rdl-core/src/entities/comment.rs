use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A reviewer note on a checklist item. Immutable once created.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Comment {
    /// Trimmed, never empty.
    pub text: String,
    pub author: String,
    /// Local wall-clock time, pre-formatted for display.
    pub timestamp: String,
}
