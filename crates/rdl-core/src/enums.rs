//! Verdicts, status enums, and action kinds for Redline.
//!
//! All enums use `snake_case` serialization via `#[serde(rename_all = "snake_case")]`.
//! Status enums with state machines provide `allowed_next_states()` to enforce
//! valid transitions at the application layer.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Verdict
// ---------------------------------------------------------------------------

/// Precomputed AI verdict attached to a checklist item.
///
/// Supplied by the catalog and never recomputed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    Pass,
    Fail,
    NeedsReview,
}

impl Verdict {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pass => "pass",
            Self::Fail => "fail",
            Self::NeedsReview => "needs_review",
        }
    }

    /// Label shown in the review table and exported artifacts.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Pass => "PASS",
            Self::Fail => "FAIL",
            Self::NeedsReview => "검토 필요",
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// ReviewState
// ---------------------------------------------------------------------------

/// Lifecycle of a checklist review session.
///
/// ```text
/// in_progress → complete   (finalize, requires every item checked)
/// complete    → in_progress (cancel)
/// ```
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum ReviewState {
    #[default]
    InProgress,
    Complete,
}

impl ReviewState {
    #[must_use]
    pub const fn allowed_next_states(self) -> &'static [Self] {
        match self {
            Self::InProgress => &[Self::Complete],
            Self::Complete => &[Self::InProgress],
        }
    }

    #[must_use]
    pub fn can_transition_to(self, next: Self) -> bool {
        self.allowed_next_states().contains(&next)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InProgress => "in_progress",
            Self::Complete => "complete",
        }
    }
}

impl fmt::Display for ReviewState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// ProjectStatus
// ---------------------------------------------------------------------------

/// Status of a contract project in the registry.
///
/// ```text
/// not_reviewed → awaiting_review (contract attached)
///              → reviewing
/// awaiting_review → reviewing → reviewed
/// reviewed → reviewing (review cancelled)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ProjectStatus {
    NotReviewed,
    AwaitingReview,
    Reviewing,
    Reviewed,
}

impl ProjectStatus {
    #[must_use]
    pub const fn allowed_next_states(self) -> &'static [Self] {
        match self {
            Self::NotReviewed => &[Self::AwaitingReview, Self::Reviewing],
            Self::AwaitingReview => &[Self::Reviewing],
            Self::Reviewing => &[Self::Reviewed],
            Self::Reviewed => &[Self::Reviewing],
        }
    }

    #[must_use]
    pub fn can_transition_to(self, next: Self) -> bool {
        self.allowed_next_states().contains(&next)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NotReviewed => "not_reviewed",
            Self::AwaitingReview => "awaiting_review",
            Self::Reviewing => "reviewing",
            Self::Reviewed => "reviewed",
        }
    }

    /// Korean label used in the project list.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::NotReviewed => "미검토",
            Self::AwaitingReview => "검토 대기",
            Self::Reviewing => "검토중",
            Self::Reviewed => "검토 완료",
        }
    }
}

impl fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// ExportFormat
// ---------------------------------------------------------------------------

/// Artifact format requested from the export collaborators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ExportFormat {
    Pdf,
    Spreadsheet,
}

impl ExportFormat {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pdf => "pdf",
            Self::Spreadsheet => "spreadsheet",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// SearchField
// ---------------------------------------------------------------------------

/// Field matched by the new-project search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum SearchField {
    #[default]
    #[serde(alias = "code")]
    ProjectCode,
    #[serde(alias = "name")]
    ProjectName,
    #[serde(alias = "manager")]
    ProjectManager,
    #[serde(alias = "company")]
    ContractCompany,
}

impl SearchField {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ProjectCode => "project_code",
            Self::ProjectName => "project_name",
            Self::ProjectManager => "project_manager",
            Self::ContractCompany => "contract_company",
        }
    }
}

impl fmt::Display for SearchField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// ReviewAction
// ---------------------------------------------------------------------------

/// Kind of mutation recorded in the review trail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ReviewAction {
    SessionOpened,
    CommentAdded,
    DraftUpdated,
    CheckToggled,
    AllChecksSet,
    Finalized,
    Cancelled,
    Exported,
}

impl ReviewAction {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::SessionOpened => "session_opened",
            Self::CommentAdded => "comment_added",
            Self::DraftUpdated => "draft_updated",
            Self::CheckToggled => "check_toggled",
            Self::AllChecksSet => "all_checks_set",
            Self::Finalized => "finalized",
            Self::Cancelled => "cancelled",
            Self::Exported => "exported",
        }
    }
}

impl fmt::Display for ReviewAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    macro_rules! test_serde_roundtrip {
        ($name:ident, $ty:ty, $variant:expr, $expected:expr) => {
            #[test]
            fn $name() {
                let json = serde_json::to_string(&$variant).unwrap();
                assert_eq!(json, format!("\"{}\"", $expected));
                let recovered: $ty = serde_json::from_str(&json).unwrap();
                assert_eq!(recovered, $variant);
            }
        };
    }

    test_serde_roundtrip!(verdict_needs_review, Verdict, Verdict::NeedsReview, "needs_review");
    test_serde_roundtrip!(review_state_in_progress, ReviewState, ReviewState::InProgress, "in_progress");
    test_serde_roundtrip!(
        project_status_awaiting,
        ProjectStatus,
        ProjectStatus::AwaitingReview,
        "awaiting_review"
    );
    test_serde_roundtrip!(export_spreadsheet, ExportFormat, ExportFormat::Spreadsheet, "spreadsheet");
    test_serde_roundtrip!(
        search_contract_company,
        SearchField,
        SearchField::ContractCompany,
        "contract_company"
    );
    test_serde_roundtrip!(action_all_checks_set, ReviewAction, ReviewAction::AllChecksSet, "all_checks_set");

    #[test]
    fn search_field_accepts_short_aliases() {
        let field: SearchField = serde_json::from_str("\"company\"").unwrap();
        assert_eq!(field, SearchField::ContractCompany);
        let field: SearchField = serde_json::from_str("\"code\"").unwrap();
        assert_eq!(field, SearchField::ProjectCode);
    }

    // --- Transition tests ---

    #[test]
    fn review_state_transitions() {
        assert!(ReviewState::InProgress.can_transition_to(ReviewState::Complete));
        assert!(ReviewState::Complete.can_transition_to(ReviewState::InProgress));
        assert!(!ReviewState::InProgress.can_transition_to(ReviewState::InProgress));
        assert!(!ReviewState::Complete.can_transition_to(ReviewState::Complete));
    }

    #[test]
    fn review_state_defaults_to_in_progress() {
        assert_eq!(ReviewState::default(), ReviewState::InProgress);
    }

    #[test]
    fn project_valid_transitions() {
        assert!(ProjectStatus::NotReviewed.can_transition_to(ProjectStatus::AwaitingReview));
        assert!(ProjectStatus::NotReviewed.can_transition_to(ProjectStatus::Reviewing));
        assert!(ProjectStatus::AwaitingReview.can_transition_to(ProjectStatus::Reviewing));
        assert!(ProjectStatus::Reviewing.can_transition_to(ProjectStatus::Reviewed));
        assert!(ProjectStatus::Reviewed.can_transition_to(ProjectStatus::Reviewing));
    }

    #[test]
    fn project_invalid_transitions() {
        assert!(!ProjectStatus::NotReviewed.can_transition_to(ProjectStatus::Reviewed));
        assert!(!ProjectStatus::AwaitingReview.can_transition_to(ProjectStatus::Reviewed));
        assert!(!ProjectStatus::Reviewed.can_transition_to(ProjectStatus::NotReviewed));
    }

    // --- Display / labels ---

    #[test]
    fn display_matches_as_str() {
        assert_eq!(format!("{}", Verdict::NeedsReview), "needs_review");
        assert_eq!(format!("{}", ReviewState::Complete), "complete");
        assert_eq!(format!("{}", ProjectStatus::Reviewing), "reviewing");
        assert_eq!(format!("{}", ExportFormat::Pdf), "pdf");
        assert_eq!(format!("{}", SearchField::ProjectName), "project_name");
        assert_eq!(format!("{}", ReviewAction::CheckToggled), "check_toggled");
    }

    #[test]
    fn labels_match_review_screen() {
        assert_eq!(Verdict::Pass.label(), "PASS");
        assert_eq!(Verdict::Fail.label(), "FAIL");
        assert_eq!(Verdict::NeedsReview.label(), "검토 필요");
        assert_eq!(ProjectStatus::Reviewed.label(), "검토 완료");
        assert_eq!(ProjectStatus::NotReviewed.label(), "미검토");
    }
}
