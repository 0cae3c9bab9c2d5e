//! Contract project registry.
//!
//! The review engine only needs [`ProjectRegistry`]: project lookup plus the
//! status notifications fired when a review is opened, finalized, or
//! cancelled. [`InMemoryRegistry`] adds the project list, intake search, and
//! dashboard used by the CLI.

use chrono::Utc;
use rdl_core::catalog::{intake_candidates, seed_projects};
use rdl_core::entities::{Project, ProjectCandidate};
use rdl_core::enums::{ProjectStatus, SearchField};
use rdl_core::errors::CoreError;
use rdl_core::ids::{code_for, project_code};
use rdl_core::responses::{DashboardEntry, DashboardStats, Page};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::ReviewError;
use crate::paging::paginate;

/// The registry side of a review: who is being reviewed, and where status
/// changes are reported.
pub trait ProjectRegistry {
    fn project(&self, id: u32) -> Option<&Project>;

    /// The project's checklist was opened.
    ///
    /// # Errors
    ///
    /// Returns `ReviewError::ProjectNotFound` for an unknown id.
    fn start_review(&mut self, id: u32) -> Result<(), ReviewError>;

    /// The project's review was finalized.
    ///
    /// # Errors
    ///
    /// Returns `ReviewError::ProjectNotFound` for an unknown id, or an
    /// invalid-transition error if the project is not under review.
    fn mark_review_complete(&mut self, id: u32) -> Result<(), ReviewError>;

    /// A finalized review was cancelled.
    ///
    /// # Errors
    ///
    /// Returns `ReviewError::ProjectNotFound` for an unknown id.
    fn revert_review_complete(&mut self, id: u32) -> Result<(), ReviewError>;
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct InMemoryRegistry {
    projects: Vec<Project>,
    candidates: Vec<ProjectCandidate>,
}

impl InMemoryRegistry {
    #[must_use]
    pub const fn new(projects: Vec<Project>, candidates: Vec<ProjectCandidate>) -> Self {
        Self {
            projects,
            candidates,
        }
    }

    /// Registry preloaded with the seed projects and the intake catalog.
    #[must_use]
    pub fn seeded() -> Self {
        Self::new(seed_projects(), intake_candidates())
    }

    #[must_use]
    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    #[must_use]
    pub fn candidates(&self) -> &[ProjectCandidate] {
        &self.candidates
    }

    fn project_mut(&mut self, id: u32) -> Result<&mut Project, ReviewError> {
        self.projects
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(ReviewError::ProjectNotFound(id))
    }

    /// Projects, most recently uploaded first.
    #[must_use]
    pub fn list_recent(&self) -> Vec<Project> {
        let mut sorted = self.projects.clone();
        sorted.sort_by(|a, b| b.uploaded_at.cmp(&a.uploaded_at));
        sorted
    }

    /// One page of [`Self::recent`]; `None` if the page does not exist.
    #[must_use]
    pub fn page(&self, page: u32, per_page: u32) -> Option<Page<Project>> {
        paginate(&self.list_recent(), page, per_page)
    }

    /// Case-insensitive substring search over intake candidates that are not
    /// yet in the registry.
    ///
    /// # Errors
    ///
    /// Returns a validation error for a blank query.
    pub fn search_candidates(
        &self,
        field: SearchField,
        query: &str,
    ) -> Result<Vec<ProjectCandidate>, ReviewError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(CoreError::Validation("enter a search term".into()).into());
        }
        let needle = query.to_lowercase();

        let hit = |value: Option<&str>| value.is_some_and(|v| v.to_lowercase().contains(&needle));

        Ok(self
            .candidates
            .iter()
            .filter(|candidate| match field {
                SearchField::ProjectCode => hit(Some(code_for(&candidate.key).as_str())),
                SearchField::ProjectName => hit(Some(candidate.name.as_str())),
                SearchField::ProjectManager => hit(candidate.manager.as_deref()),
                SearchField::ContractCompany => hit(candidate.contract_company.as_deref()),
            })
            .cloned()
            .collect())
    }

    /// Move an intake candidate into the registry as a new, unreviewed project.
    ///
    /// # Errors
    ///
    /// Returns `ReviewError::CandidateNotFound` if no candidate has this key.
    pub fn load_candidate(&mut self, key: &str) -> Result<&Project, ReviewError> {
        let position = self
            .candidates
            .iter()
            .position(|c| c.key == key)
            .ok_or_else(|| ReviewError::CandidateNotFound(key.to_string()))?;
        let candidate = self.candidates.remove(position);

        let id = self.projects.iter().map(|p| p.id).max().unwrap_or(0) + 1;
        tracing::info!(id, key, name = %candidate.name, "loaded project from intake");
        self.projects.push(Project {
            id,
            code: project_code(id),
            name: candidate.name,
            description: candidate.description,
            status: ProjectStatus::NotReviewed,
            uploaded_at: Utc::now(),
            is_complete: false,
            attachments: Vec::new(),
            manager: candidate.manager,
            contract_company: candidate.contract_company,
        });

        self.project(id).ok_or(ReviewError::ProjectNotFound(id))
    }

    /// Record a contract file. An unreviewed project moves to awaiting review.
    ///
    /// # Errors
    ///
    /// Returns `ReviewError::ProjectNotFound` for an unknown id, or a
    /// validation error for a blank file name.
    pub fn attach_file(&mut self, id: u32, file_name: &str) -> Result<&Project, ReviewError> {
        let file_name = file_name.trim();
        if file_name.is_empty() {
            return Err(CoreError::Validation("file name must not be blank".into()).into());
        }
        let project = self.project_mut(id)?;
        project.attachments.push(file_name.to_string());
        if project.status == ProjectStatus::NotReviewed {
            project.status = ProjectStatus::AwaitingReview;
        }
        tracing::debug!(id, file_name, status = %project.status, "attached contract file");
        Ok(project)
    }

    /// Status counts and the most recent `recent_limit` uploads.
    #[must_use]
    pub fn dashboard(&self, recent_limit: usize) -> DashboardStats {
        let count = |status: ProjectStatus| {
            let n = self.projects.iter().filter(|p| p.status == status).count();
            u32::try_from(n).unwrap_or(u32::MAX)
        };

        DashboardStats {
            reviewing: count(ProjectStatus::Reviewing),
            reviewed: count(ProjectStatus::Reviewed),
            not_reviewed: count(ProjectStatus::NotReviewed),
            awaiting_review: count(ProjectStatus::AwaitingReview),
            total: u32::try_from(self.projects.len()).unwrap_or(u32::MAX),
            recent: self
                .list_recent()
                .iter()
                .take(recent_limit)
                .map(DashboardEntry::from_project)
                .collect(),
        }
    }

    fn transition(project: &mut Project, next: ProjectStatus) -> Result<(), ReviewError> {
        if !project.status.can_transition_to(next) {
            return Err(CoreError::InvalidTransition {
                entity_type: "project".into(),
                id: project.code.clone(),
                from: project.status.to_string(),
                to: next.to_string(),
            }
            .into());
        }
        project.status = next;
        Ok(())
    }
}

impl ProjectRegistry for InMemoryRegistry {
    fn project(&self, id: u32) -> Option<&Project> {
        self.projects.iter().find(|p| p.id == id)
    }

    fn start_review(&mut self, id: u32) -> Result<(), ReviewError> {
        let project = self.project_mut(id)?;
        if matches!(
            project.status,
            ProjectStatus::Reviewing | ProjectStatus::Reviewed
        ) {
            return Ok(());
        }
        Self::transition(project, ProjectStatus::Reviewing)
    }

    fn mark_review_complete(&mut self, id: u32) -> Result<(), ReviewError> {
        let project = self.project_mut(id)?;
        if project.status != ProjectStatus::Reviewed {
            Self::transition(project, ProjectStatus::Reviewed)?;
        }
        project.is_complete = true;
        Ok(())
    }

    fn revert_review_complete(&mut self, id: u32) -> Result<(), ReviewError> {
        let project = self.project_mut(id)?;
        if project.status == ProjectStatus::Reviewed {
            Self::transition(project, ProjectStatus::Reviewing)?;
        }
        project.is_complete = false;
        Ok(())
    }
}
