//! Per-project review sessions, created on first access.

use std::collections::BTreeMap;

use rdl_core::entities::Project;
use serde::{Deserialize, Serialize};

use crate::session::ReviewSession;

/// Sessions keyed by project id.
///
/// Switching projects never discards another project's checks, comments, or
/// drafts; each id maps to exactly one session for the life of the store.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct SessionStore {
    sessions: BTreeMap<u32, ReviewSession>,
}

impl SessionStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn get(&self, project_id: u32) -> Option<&ReviewSession> {
        self.sessions.get(&project_id)
    }

    pub fn get_mut(&mut self, project_id: u32) -> Option<&mut ReviewSession> {
        self.sessions.get_mut(&project_id)
    }

    /// The project's session, seeded from the default checklist if this is
    /// the first time it is opened.
    pub fn get_or_create(&mut self, project: &Project) -> &mut ReviewSession {
        self.sessions.entry(project.id).or_insert_with(|| {
            tracing::debug!(project_id = project.id, "creating review session");
            ReviewSession::for_project(project)
        })
    }

    #[must_use]
    pub fn contains(&self, project_id: u32) -> bool {
        self.sessions.contains_key(&project_id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use rdl_core::catalog::seed_projects;

    use super::*;

    #[test]
    fn creates_once_per_project() {
        let projects = seed_projects();
        let mut store = SessionStore::new();

        store.get_or_create(&projects[0]).set_all_checked(true);
        store.get_or_create(&projects[1]);
        assert_eq!(store.len(), 2);

        let again = store.get_or_create(&projects[0]);
        assert!(again.all_checked());
        assert!(!store.get(2).unwrap().all_checked());
    }

    #[test]
    fn empty_until_first_access() {
        let store = SessionStore::new();
        assert!(store.is_empty());
        assert!(!store.contains(1));
        assert!(store.get(1).is_none());
    }
}
