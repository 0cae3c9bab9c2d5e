//! One project's checklist review: comments, confirmation flags, and the
//! in-progress/complete state machine.
//!
//! `is_export_ready` is derived from the state, so it cannot drift from
//! `is_complete`. Mutations on a complete session are refused with
//! [`IgnoreReason::ReviewComplete`] and leave every field untouched.

use chrono::{DateTime, Utc};
use rdl_core::catalog::default_checklist;
use rdl_core::entities::{ChecklistCategory, ChecklistItem, Comment, Project};
use rdl_core::enums::ReviewState;
use rdl_core::export::{ExportRow, ExportTable};
use rdl_core::responses::ReviewSummary;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::clock::Clock;
use crate::error::ReviewError;
use crate::outcome::{DraftKeyResponse, IgnoreReason, KeySignal, Outcome};

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ReviewSession {
    project_id: u32,
    project_code: String,
    project_name: String,
    categories: Vec<ChecklistCategory>,
    state: ReviewState,
}

impl ReviewSession {
    /// Start a session for `project` from the static checklist catalog.
    ///
    /// A project the registry already lists as complete opens read-only.
    #[must_use]
    pub fn for_project(project: &Project) -> Self {
        Self::with_checklist(project, default_checklist())
    }

    #[must_use]
    pub fn with_checklist(project: &Project, categories: Vec<ChecklistCategory>) -> Self {
        let state = if project.is_complete {
            ReviewState::Complete
        } else {
            ReviewState::InProgress
        };
        Self {
            project_id: project.id,
            project_code: project.code.clone(),
            project_name: project.name.clone(),
            categories,
            state,
        }
    }

    #[must_use]
    pub const fn project_id(&self) -> u32 {
        self.project_id
    }

    #[must_use]
    pub fn categories(&self) -> &[ChecklistCategory] {
        &self.categories
    }

    #[must_use]
    pub const fn state(&self) -> ReviewState {
        self.state
    }

    /// True when every item is checked. An empty checklist counts as checked.
    #[must_use]
    pub fn all_checked(&self) -> bool {
        self.items().all(|item| item.is_checked)
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.state == ReviewState::Complete
    }

    #[must_use]
    pub fn is_export_ready(&self) -> bool {
        self.is_complete()
    }

    #[must_use]
    pub fn total_items(&self) -> usize {
        self.items().count()
    }

    #[must_use]
    pub fn checked_items(&self) -> usize {
        self.items().filter(|item| item.is_checked).count()
    }

    fn items(&self) -> impl Iterator<Item = &ChecklistItem> {
        self.categories.iter().flat_map(|category| category.items.iter())
    }

    /// Look up one item by position.
    ///
    /// # Errors
    ///
    /// Returns `ReviewError::ItemNotFound` if either index is out of range.
    pub fn item(&self, category: usize, item: usize) -> Result<&ChecklistItem, ReviewError> {
        self.categories
            .get(category)
            .and_then(|c| c.items.get(item))
            .ok_or(ReviewError::ItemNotFound { category, item })
    }

    fn item_mut(&mut self, category: usize, item: usize) -> Result<&mut ChecklistItem, ReviewError> {
        self.categories
            .get_mut(category)
            .and_then(|c| c.items.get_mut(item))
            .ok_or(ReviewError::ItemNotFound { category, item })
    }

    /// Resolve the item, refusing if the session is read-only.
    fn editable_item(
        &mut self,
        category: usize,
        item: usize,
    ) -> Result<Result<&mut ChecklistItem, IgnoreReason>, ReviewError> {
        let complete = self.is_complete();
        let target = self.item_mut(category, item)?;
        if complete {
            return Ok(Err(IgnoreReason::ReviewComplete));
        }
        Ok(Ok(target))
    }

    /// Prepend a comment and clear the item's draft.
    ///
    /// Blank text is refused and the draft is kept.
    ///
    /// # Errors
    ///
    /// Returns `ReviewError::ItemNotFound` if either index is out of range.
    pub fn add_comment(
        &mut self,
        category: usize,
        item: usize,
        text: &str,
        author: &str,
        clock: &dyn Clock,
    ) -> Result<Outcome, ReviewError> {
        let target = match self.editable_item(category, item)? {
            Ok(target) => target,
            Err(reason) => return Ok(Outcome::Ignored(reason)),
        };

        let text = text.trim();
        if text.is_empty() {
            return Ok(Outcome::Ignored(IgnoreReason::BlankComment));
        }

        target.comments.insert(
            0,
            Comment {
                text: text.to_string(),
                author: author.to_string(),
                timestamp: clock.stamp(),
            },
        );
        target.draft_comment.clear();
        Ok(Outcome::Applied)
    }

    /// Overwrite the item's draft verbatim.
    ///
    /// # Errors
    ///
    /// Returns `ReviewError::ItemNotFound` if either index is out of range.
    pub fn set_draft_comment(
        &mut self,
        category: usize,
        item: usize,
        text: &str,
    ) -> Result<Outcome, ReviewError> {
        match self.editable_item(category, item)? {
            Ok(target) => {
                text.clone_into(&mut target.draft_comment);
                Ok(Outcome::Applied)
            }
            Err(reason) => Ok(Outcome::Ignored(reason)),
        }
    }

    /// Enter submits the current draft as a comment and suppresses the
    /// editor's newline; any other key is left to the editor.
    ///
    /// # Errors
    ///
    /// Returns `ReviewError::ItemNotFound` if either index is out of range.
    pub fn submit_draft_on_key(
        &mut self,
        category: usize,
        item: usize,
        key: KeySignal,
        author: &str,
        clock: &dyn Clock,
    ) -> Result<DraftKeyResponse, ReviewError> {
        let draft = self.item(category, item)?.draft_comment.clone();
        if key != KeySignal::Enter {
            return Ok(DraftKeyResponse {
                outcome: Outcome::Ignored(IgnoreReason::KeyNotHandled),
                suppress_default: false,
            });
        }
        let outcome = self.add_comment(category, item, &draft, author, clock)?;
        Ok(DraftKeyResponse {
            outcome,
            suppress_default: true,
        })
    }

    /// Flip exactly one item's confirmation flag.
    ///
    /// # Errors
    ///
    /// Returns `ReviewError::ItemNotFound` if either index is out of range.
    pub fn toggle_checked(&mut self, category: usize, item: usize) -> Result<Outcome, ReviewError> {
        match self.editable_item(category, item)? {
            Ok(target) => {
                target.is_checked = !target.is_checked;
                Ok(Outcome::Applied)
            }
            Err(reason) => Ok(Outcome::Ignored(reason)),
        }
    }

    /// Set every item's confirmation flag at once.
    pub fn set_all_checked(&mut self, value: bool) -> Outcome {
        if self.is_complete() {
            return Outcome::Ignored(IgnoreReason::ReviewComplete);
        }
        for category in &mut self.categories {
            for item in &mut category.items {
                item.is_checked = value;
            }
        }
        Outcome::Applied
    }

    /// Move to `Complete` if every item is checked.
    pub fn finalize(&mut self) -> Outcome {
        if self.is_complete() {
            return Outcome::Ignored(IgnoreReason::AlreadyComplete);
        }
        if !self.all_checked() {
            return Outcome::Ignored(IgnoreReason::NotAllChecked);
        }
        self.state = ReviewState::Complete;
        Outcome::Applied
    }

    /// Return to `InProgress`. Checks and comments are kept.
    pub fn cancel(&mut self) -> Outcome {
        if !self.is_complete() {
            return Outcome::Ignored(IgnoreReason::NotComplete);
        }
        self.state = ReviewState::InProgress;
        Outcome::Applied
    }

    /// Snapshot the review table in display order.
    #[must_use]
    pub fn export_table(&self, exported_at: DateTime<Utc>) -> ExportTable {
        let rows = self
            .categories
            .iter()
            .flat_map(|category| {
                category.items.iter().map(|item| ExportRow {
                    category: category.name.clone(),
                    item: item.name.clone(),
                    result: item.result,
                    comments: item.comments.clone(),
                })
            })
            .collect();

        ExportTable {
            project_id: self.project_id,
            project_code: self.project_code.clone(),
            project_name: self.project_name.clone(),
            exported_at,
            rows,
        }
    }

    #[must_use]
    pub fn summary(&self) -> ReviewSummary {
        ReviewSummary {
            project_id: self.project_id,
            project_name: self.project_name.clone(),
            state: self.state,
            checked_items: u32::try_from(self.checked_items()).unwrap_or(u32::MAX),
            total_items: u32::try_from(self.total_items()).unwrap_or(u32::MAX),
            all_checked: self.all_checked(),
            is_complete: self.is_complete(),
            is_export_ready: self.is_export_ready(),
        }
    }
}
