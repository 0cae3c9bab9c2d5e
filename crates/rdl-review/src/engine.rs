//! `ReviewEngine`: the review sessions of every project, wired to a project
//! registry, a clock, and change observers.
//!
//! All mutations are addressed by project id. The first access to a project
//! creates its session from the default checklist and tells the registry the
//! review has started.

use std::collections::BTreeSet;
use std::path::PathBuf;

use rdl_config::ReviewConfig;
use rdl_core::entities::ChecklistItem;
use rdl_core::enums::{ExportFormat, ReviewAction};
use rdl_core::export::ExportTable;
use rdl_core::responses::{ReviewSummary, ReviewView};
use rdl_export::{Artifact, ArtifactRenderer, ArtifactSink};
use serde::Serialize;

use crate::clock::Clock;
use crate::error::ReviewError;
use crate::observer::{ItemRef, ReviewEvent, ReviewObserver};
use crate::outcome::{DraftKeyResponse, IgnoreReason, KeySignal, Outcome};
use crate::registry::ProjectRegistry;
use crate::session::ReviewSession;
use crate::store::SessionStore;

/// Engine knobs taken from the `[review]` config section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineSettings {
    pub author: String,
    /// Cancelling a finalized review also moves the project back to
    /// `reviewing` in the registry.
    pub revert_registry_on_cancel: bool,
}

impl From<&ReviewConfig> for EngineSettings {
    fn from(config: &ReviewConfig) -> Self {
        Self {
            author: config.default_author.clone(),
            revert_registry_on_cancel: config.revert_registry_on_cancel,
        }
    }
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self::from(&ReviewConfig::default())
    }
}

/// Proof that an export was started. Holding one keeps the project's export
/// busy flag set; hand it back through [`ReviewEngine::finish_export`] or
/// [`ReviewEngine::abandon_export`].
#[derive(Debug, PartialEq, Eq)]
#[must_use = "an unreturned ticket blocks further exports of this project"]
pub struct ExportTicket {
    project_id: u32,
    format: ExportFormat,
    table: ExportTable,
}

impl ExportTicket {
    #[must_use]
    pub const fn project_id(&self) -> u32 {
        self.project_id
    }

    #[must_use]
    pub const fn format(&self) -> ExportFormat {
        self.format
    }

    /// The rows to render, in display order.
    #[must_use]
    pub const fn table(&self) -> &ExportTable {
        &self.table
    }
}

/// Result of [`ReviewEngine::export_artifact`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportReport {
    pub outcome: Outcome,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub artifact: Option<Artifact>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

impl ExportReport {
    const fn ignored(reason: IgnoreReason) -> Self {
        Self {
            outcome: Outcome::Ignored(reason),
            artifact: None,
            path: None,
        }
    }
}

pub struct ReviewEngine<R: ProjectRegistry> {
    store: SessionStore,
    registry: R,
    clock: Box<dyn Clock>,
    observers: Vec<Box<dyn ReviewObserver>>,
    settings: EngineSettings,
    exports_in_flight: BTreeSet<u32>,
}

impl<R: ProjectRegistry> ReviewEngine<R> {
    pub fn new(registry: R, clock: Box<dyn Clock>, settings: EngineSettings) -> Self {
        Self::with_store(SessionStore::new(), registry, clock, settings)
    }

    /// Resume from previously saved sessions.
    pub fn with_store(
        store: SessionStore,
        registry: R,
        clock: Box<dyn Clock>,
        settings: EngineSettings,
    ) -> Self {
        Self {
            store,
            registry,
            clock,
            observers: Vec::new(),
            settings,
            exports_in_flight: BTreeSet::new(),
        }
    }

    pub fn subscribe(&mut self, observer: Box<dyn ReviewObserver>) {
        self.observers.push(observer);
    }

    #[must_use]
    pub const fn registry(&self) -> &R {
        &self.registry
    }

    pub const fn registry_mut(&mut self) -> &mut R {
        &mut self.registry
    }

    #[must_use]
    pub const fn store(&self) -> &SessionStore {
        &self.store
    }

    #[must_use]
    pub const fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    /// Hand back the sessions and registry, e.g. to persist them.
    pub fn into_parts(self) -> (SessionStore, R) {
        (self.store, self.registry)
    }

    // -----------------------------------------------------------------------
    // Sessions
    // -----------------------------------------------------------------------

    /// Open (or re-open) a project's review.
    ///
    /// # Errors
    ///
    /// Returns `ReviewError::ProjectNotFound` for an unknown id.
    pub fn open(&mut self, project_id: u32) -> Result<&ReviewSession, ReviewError> {
        self.ensure_open(project_id)?;
        self.session(project_id)
    }

    fn ensure_open(&mut self, project_id: u32) -> Result<(), ReviewError> {
        if self.store.contains(project_id) {
            return Ok(());
        }
        let project = self
            .registry
            .project(project_id)
            .ok_or(ReviewError::ProjectNotFound(project_id))?
            .clone();
        self.registry.start_review(project_id)?;
        self.store.get_or_create(&project);
        tracing::debug!(project_id, name = %project.name, "opened review");
        self.emit(project_id, ReviewAction::SessionOpened, None, None);
        Ok(())
    }

    fn session(&self, project_id: u32) -> Result<&ReviewSession, ReviewError> {
        self.store
            .get(project_id)
            .ok_or(ReviewError::ProjectNotFound(project_id))
    }

    fn session_mut(&mut self, project_id: u32) -> Result<&mut ReviewSession, ReviewError> {
        self.ensure_open(project_id)?;
        self.store
            .get_mut(project_id)
            .ok_or(ReviewError::ProjectNotFound(project_id))
    }

    /// What the review screen shows. `None` is the explicit
    /// "select a project" state.
    ///
    /// # Errors
    ///
    /// Returns `ReviewError::ProjectNotFound` for an unknown id.
    pub fn view(&mut self, project_id: Option<u32>) -> Result<ReviewView, ReviewError> {
        let Some(project_id) = project_id else {
            return Ok(ReviewView::no_project());
        };
        let session = self.open(project_id)?;
        Ok(ReviewView::Selected {
            summary: session.summary(),
            categories: session.categories().to_vec(),
        })
    }

    /// # Errors
    ///
    /// Returns `ReviewError::ProjectNotFound` for an unknown id.
    pub fn summary(&mut self, project_id: u32) -> Result<ReviewSummary, ReviewError> {
        Ok(self.open(project_id)?.summary())
    }

    /// # Errors
    ///
    /// Returns `ReviewError::ProjectNotFound` or `ReviewError::ItemNotFound`.
    pub fn item(
        &mut self,
        project_id: u32,
        category: usize,
        item: usize,
    ) -> Result<&ChecklistItem, ReviewError> {
        self.open(project_id)?.item(category, item)
    }

    // -----------------------------------------------------------------------
    // Item mutations
    // -----------------------------------------------------------------------

    /// Comment as the configured default author.
    ///
    /// # Errors
    ///
    /// Returns `ReviewError::ProjectNotFound` or `ReviewError::ItemNotFound`.
    pub fn add_comment(
        &mut self,
        project_id: u32,
        category: usize,
        item: usize,
        text: &str,
    ) -> Result<Outcome, ReviewError> {
        let author = self.settings.author.clone();
        self.add_comment_as(project_id, category, item, text, &author)
    }

    /// # Errors
    ///
    /// Returns `ReviewError::ProjectNotFound` or `ReviewError::ItemNotFound`.
    pub fn add_comment_as(
        &mut self,
        project_id: u32,
        category: usize,
        item: usize,
        text: &str,
        author: &str,
    ) -> Result<Outcome, ReviewError> {
        self.ensure_open(project_id)?;
        let clock = &*self.clock;
        let outcome = self
            .store
            .get_mut(project_id)
            .ok_or(ReviewError::ProjectNotFound(project_id))?
            .add_comment(category, item, text, author, clock)?;

        let detail = serde_json::json!({ "author": author, "text": text.trim() });
        self.settle(
            project_id,
            outcome,
            ReviewAction::CommentAdded,
            Some(ItemRef { category, item }),
            Some(detail),
        );
        Ok(outcome)
    }

    /// # Errors
    ///
    /// Returns `ReviewError::ProjectNotFound` or `ReviewError::ItemNotFound`.
    pub fn set_draft_comment(
        &mut self,
        project_id: u32,
        category: usize,
        item: usize,
        text: &str,
    ) -> Result<Outcome, ReviewError> {
        let outcome = self
            .session_mut(project_id)?
            .set_draft_comment(category, item, text)?;
        self.settle(
            project_id,
            outcome,
            ReviewAction::DraftUpdated,
            Some(ItemRef { category, item }),
            None,
        );
        Ok(outcome)
    }

    /// # Errors
    ///
    /// Returns `ReviewError::ProjectNotFound` or `ReviewError::ItemNotFound`.
    pub fn submit_draft_on_key(
        &mut self,
        project_id: u32,
        category: usize,
        item: usize,
        key: KeySignal,
    ) -> Result<DraftKeyResponse, ReviewError> {
        self.ensure_open(project_id)?;
        let clock = &*self.clock;
        let author = self.settings.author.as_str();
        let session = self
            .store
            .get_mut(project_id)
            .ok_or(ReviewError::ProjectNotFound(project_id))?;
        let draft = session.item(category, item)?.draft_comment.trim().to_string();
        let response = session.submit_draft_on_key(category, item, key, author, clock)?;

        if key == KeySignal::Enter {
            let detail = serde_json::json!({ "author": self.settings.author, "text": draft });
            self.settle(
                project_id,
                response.outcome,
                ReviewAction::CommentAdded,
                Some(ItemRef { category, item }),
                Some(detail),
            );
        }
        Ok(response)
    }

    /// # Errors
    ///
    /// Returns `ReviewError::ProjectNotFound` or `ReviewError::ItemNotFound`.
    pub fn toggle_checked(
        &mut self,
        project_id: u32,
        category: usize,
        item: usize,
    ) -> Result<Outcome, ReviewError> {
        let session = self.session_mut(project_id)?;
        let outcome = session.toggle_checked(category, item)?;
        let checked = session.item(category, item)?.is_checked;
        self.settle(
            project_id,
            outcome,
            ReviewAction::CheckToggled,
            Some(ItemRef { category, item }),
            Some(serde_json::json!({ "is_checked": checked })),
        );
        Ok(outcome)
    }

    /// # Errors
    ///
    /// Returns `ReviewError::ProjectNotFound` for an unknown id.
    pub fn set_all_checked(&mut self, project_id: u32, value: bool) -> Result<Outcome, ReviewError> {
        let outcome = self.session_mut(project_id)?.set_all_checked(value);
        self.settle(
            project_id,
            outcome,
            ReviewAction::AllChecksSet,
            None,
            Some(serde_json::json!({ "is_checked": value })),
        );
        Ok(outcome)
    }

    // -----------------------------------------------------------------------
    // Completion
    // -----------------------------------------------------------------------

    /// Finalize the review and mark the project reviewed in the registry.
    ///
    /// # Errors
    ///
    /// Returns `ReviewError::ProjectNotFound` for an unknown id, or the
    /// registry's error if it refuses the status change. The session is
    /// rolled back in that case.
    pub fn finalize(&mut self, project_id: u32) -> Result<Outcome, ReviewError> {
        let outcome = self.session_mut(project_id)?.finalize();
        if outcome.is_applied() {
            if let Err(e) = self.registry.mark_review_complete(project_id) {
                let rolled_back = self
                    .store
                    .get_mut(project_id)
                    .map(ReviewSession::cancel);
                tracing::warn!(project_id, ?rolled_back, "registry refused completion: {e}");
                return Err(e);
            }
            tracing::info!(project_id, "review finalized");
        }
        self.settle(project_id, outcome, ReviewAction::Finalized, None, None);
        Ok(outcome)
    }

    /// Re-open a finalized review. Checks and comments are kept.
    ///
    /// # Errors
    ///
    /// Returns `ReviewError::ProjectNotFound` for an unknown id, or the
    /// registry's error when reverting its status fails. The session stays
    /// finalized in that case.
    pub fn cancel_review(&mut self, project_id: u32) -> Result<Outcome, ReviewError> {
        let outcome = self.session_mut(project_id)?.cancel();
        if outcome.is_applied() {
            if self.settings.revert_registry_on_cancel {
                if let Err(e) = self.registry.revert_review_complete(project_id) {
                    let restored = self
                        .store
                        .get_mut(project_id)
                        .map(ReviewSession::finalize);
                    tracing::warn!(project_id, ?restored, "registry refused revert: {e}");
                    return Err(e);
                }
            }
            tracing::info!(
                project_id,
                reverted = self.settings.revert_registry_on_cancel,
                "review cancelled"
            );
        }
        self.settle(project_id, outcome, ReviewAction::Cancelled, None, None);
        Ok(outcome)
    }

    // -----------------------------------------------------------------------
    // Export
    // -----------------------------------------------------------------------

    /// Snapshot the review table and set the project's export busy flag.
    ///
    /// Returns the refusal reason when the review is not finalized or another
    /// export of the project is still running.
    ///
    /// # Errors
    ///
    /// Returns `ReviewError::ProjectNotFound` for an unknown id.
    pub fn begin_export(
        &mut self,
        project_id: u32,
        format: ExportFormat,
    ) -> Result<Result<ExportTicket, IgnoreReason>, ReviewError> {
        let now = self.clock.now_utc();
        let session = self.session_mut(project_id)?;
        if !session.is_export_ready() {
            tracing::warn!(project_id, "export refused: review is not finalized");
            return Ok(Err(IgnoreReason::NotExportReady));
        }
        let table = session.export_table(now);
        if !self.exports_in_flight.insert(project_id) {
            tracing::warn!(project_id, "export refused: another export is in flight");
            return Ok(Err(IgnoreReason::ExportInFlight));
        }
        Ok(Ok(ExportTicket {
            project_id,
            format,
            table,
        }))
    }

    /// Release the busy flag after the artifact was stored.
    pub fn finish_export(&mut self, ticket: ExportTicket, artifact: &Artifact) {
        self.exports_in_flight.remove(&ticket.project_id);
        tracing::info!(
            project_id = ticket.project_id,
            format = %ticket.format,
            file = %artifact.file_name,
            "review exported"
        );
        let detail = serde_json::json!({
            "format": ticket.format,
            "file_name": artifact.file_name,
            "rows": ticket.table.rows.len(),
        });
        self.emit(ticket.project_id, ReviewAction::Exported, None, Some(detail));
    }

    /// Release the busy flag without recording an export.
    pub fn abandon_export(&mut self, ticket: ExportTicket) {
        self.exports_in_flight.remove(&ticket.project_id);
        tracing::debug!(project_id = ticket.project_id, "export abandoned");
    }

    #[must_use]
    pub fn is_export_in_flight(&self, project_id: u32) -> bool {
        self.exports_in_flight.contains(&project_id)
    }

    /// Render the review table with `renderer` and store it with `sink`.
    ///
    /// # Errors
    ///
    /// Returns `ReviewError::ProjectNotFound` for an unknown id, or
    /// `ReviewError::Export` if rendering or saving fails. The busy flag is
    /// released either way.
    pub fn export_artifact(
        &mut self,
        project_id: u32,
        renderer: &dyn ArtifactRenderer,
        sink: &dyn ArtifactSink,
    ) -> Result<ExportReport, ReviewError> {
        let ticket = match self.begin_export(project_id, renderer.format())? {
            Ok(ticket) => ticket,
            Err(reason) => return Ok(ExportReport::ignored(reason)),
        };

        let saved = renderer
            .render(ticket.table())
            .and_then(|artifact| sink.save(&artifact).map(|path| (artifact, path)));

        match saved {
            Ok((artifact, path)) => {
                self.finish_export(ticket, &artifact);
                Ok(ExportReport {
                    outcome: Outcome::Applied,
                    artifact: Some(artifact),
                    path: Some(path),
                })
            }
            Err(e) => {
                self.abandon_export(ticket);
                Err(e.into())
            }
        }
    }

    // -----------------------------------------------------------------------
    // Notifications
    // -----------------------------------------------------------------------

    fn settle(
        &mut self,
        project_id: u32,
        outcome: Outcome,
        action: ReviewAction,
        target: Option<ItemRef>,
        detail: Option<serde_json::Value>,
    ) {
        match outcome {
            Outcome::Applied => {
                tracing::debug!(project_id, action = %action, ?target, "review updated");
                self.emit(project_id, action, target, detail);
            }
            Outcome::Ignored(reason) => {
                tracing::warn!(project_id, action = %action, ?reason, "review change ignored");
            }
        }
    }

    fn emit(
        &mut self,
        project_id: u32,
        action: ReviewAction,
        target: Option<ItemRef>,
        detail: Option<serde_json::Value>,
    ) {
        let Some(session) = self.store.get(project_id) else {
            return;
        };
        let event = ReviewEvent {
            project_id,
            action,
            target,
            state: session.state(),
            detail,
            at: self.clock.now_utc(),
        };
        for observer in &mut self.observers {
            observer.on_event(&event, session);
        }
    }
}
