//! Response types returned as JSON by `rdl` commands.

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::entities::{ChecklistCategory, Project};
use crate::enums::{ProjectStatus, ReviewState};

/// One page of a sorted listing. Pages are 1-based.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: u32,
    pub per_page: u32,
    pub total_pages: u32,
    pub total_items: u32,
}

/// Response from `rdl dashboard`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct DashboardStats {
    pub reviewing: u32,
    pub reviewed: u32,
    pub not_reviewed: u32,
    pub awaiting_review: u32,
    pub total: u32,
    pub recent: Vec<DashboardEntry>,
}

/// A row of the dashboard's recent-uploads list.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct DashboardEntry {
    pub id: u32,
    pub name: String,
    pub description: String,
    pub uploaded_at: DateTime<Utc>,
    /// 최종검토 완료, 검토중, or 계약서 업로드 대기중.
    pub status_label: String,
}

impl DashboardEntry {
    #[must_use]
    pub fn from_project(project: &Project) -> Self {
        let status_label = if project.is_complete {
            "최종검토 완료"
        } else if project.status == ProjectStatus::Reviewing {
            "검토중"
        } else {
            "계약서 업로드 대기중"
        };
        Self {
            id: project.id,
            name: project.name.clone(),
            description: project.description.clone(),
            uploaded_at: project.uploaded_at,
            status_label: status_label.to_string(),
        }
    }
}

/// Gate flags and progress for one review session.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ReviewSummary {
    pub project_id: u32,
    pub project_name: String,
    pub state: ReviewState,
    pub checked_items: u32,
    pub total_items: u32,
    pub all_checked: bool,
    pub is_complete: bool,
    pub is_export_ready: bool,
}

/// What the review screen shows: a project's checklist, or the explicit
/// prompt to pick one.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(tag = "view", rename_all = "snake_case")]
pub enum ReviewView {
    Selected {
        summary: ReviewSummary,
        categories: Vec<ChecklistCategory>,
    },
    NoProjectSelected {
        message: String,
    },
}

impl ReviewView {
    pub const SELECT_PROMPT: &'static str = "프로젝트를 선택해주세요.";

    #[must_use]
    pub fn no_project() -> Self {
        Self::NoProjectSelected {
            message: Self::SELECT_PROMPT.to_string(),
        }
    }
}
