use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::entities::Comment;
use crate::enums::Verdict;

/// One AI checklist line: a fixed label and verdict plus the reviewer's
/// mutable confirmation flag, comment thread, and draft input.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ChecklistItem {
    pub name: String,
    pub result: Verdict,
    /// Newest first.
    #[serde(default)]
    pub comments: Vec<Comment>,
    #[serde(default)]
    pub is_checked: bool,
    #[serde(default)]
    pub draft_comment: String,
}

impl ChecklistItem {
    /// Fresh, unchecked item with no comments.
    #[must_use]
    pub fn new(name: impl Into<String>, result: Verdict) -> Self {
        Self {
            name: name.into(),
            result,
            comments: Vec::new(),
            is_checked: false,
            draft_comment: String::new(),
        }
    }
}

/// A domain area of the checklist ("기본사항", "보증", ...).
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ChecklistCategory {
    pub name: String,
    pub items: Vec<ChecklistItem>,
}

impl ChecklistCategory {
    #[must_use]
    pub fn new(name: impl Into<String>, items: Vec<ChecklistItem>) -> Self {
        Self {
            name: name.into(),
            items,
        }
    }
}
