//! The export payload handed to rendering collaborators.
//!
//! Rows mirror the review table exactly: categories in catalog order, items in
//! category order, comments newest first.

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::entities::Comment;
use crate::enums::Verdict;

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ExportTable {
    pub project_id: u32,
    pub project_code: String,
    pub project_name: String,
    pub exported_at: DateTime<Utc>,
    pub rows: Vec<ExportRow>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ExportRow {
    pub category: String,
    pub item: String,
    pub result: Verdict,
    pub comments: Vec<Comment>,
}
