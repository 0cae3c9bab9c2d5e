use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::ProjectStatus;

/// A contract project tracked by the registry.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Project {
    pub id: u32,
    /// Display code, `DS` followed by the zero-padded id.
    pub code: String,
    pub name: String,
    pub description: String,
    pub status: ProjectStatus,
    pub uploaded_at: DateTime<Utc>,
    pub is_complete: bool,
    /// Names of attached contract files.
    #[serde(default)]
    pub attachments: Vec<String>,
    pub manager: Option<String>,
    pub contract_company: Option<String>,
}

/// A project that can be pulled into the registry from the intake catalog.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ProjectCandidate {
    /// Intake key, e.g. `new7`.
    pub key: String,
    pub name: String,
    pub description: String,
    pub manager: Option<String>,
    pub contract_company: Option<String>,
}
