//! The CLI's on-disk state: the project registry and every review session,
//! stored as one JSON document at `<state_dir>/state.json`.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ReviewError;
use crate::registry::InMemoryRegistry;
use crate::store::SessionStore;

pub const STATE_FILE_NAME: &str = "state.json";
pub const TRAIL_DIR_NAME: &str = "trail";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateFile {
    pub registry: InMemoryRegistry,
    #[serde(default)]
    pub sessions: SessionStore,
}

impl Default for StateFile {
    /// Seed projects and the intake catalog, no sessions.
    fn default() -> Self {
        Self {
            registry: InMemoryRegistry::seeded(),
            sessions: SessionStore::new(),
        }
    }
}

impl StateFile {
    #[must_use]
    pub fn path_in(state_dir: &Path) -> PathBuf {
        state_dir.join(STATE_FILE_NAME)
    }

    #[must_use]
    pub fn trail_dir_in(state_dir: &Path) -> PathBuf {
        state_dir.join(TRAIL_DIR_NAME)
    }

    /// Load `<state_dir>/state.json`, or seed data if it does not exist yet.
    ///
    /// # Errors
    ///
    /// Returns `ReviewError::State` if the file exists but cannot be read or
    /// parsed.
    pub fn load(state_dir: &Path) -> Result<Self, ReviewError> {
        let path = Self::path_in(state_dir);
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no state file, starting from seed data");
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(&path)
            .map_err(|e| ReviewError::State(format!("{}: {e}", path.display())))?;
        serde_json::from_str(&text)
            .map_err(|e| ReviewError::State(format!("{}: {e}", path.display())))
    }

    /// Write the state file, creating `state_dir` if needed.
    ///
    /// # Errors
    ///
    /// Returns `ReviewError::State` if serialization or the write fails.
    pub fn save(&self, state_dir: &Path) -> Result<PathBuf, ReviewError> {
        std::fs::create_dir_all(state_dir)
            .map_err(|e| ReviewError::State(format!("{}: {e}", state_dir.display())))?;
        let path = Self::path_in(state_dir);
        let text =
            serde_json::to_string_pretty(self).map_err(|e| ReviewError::State(e.to_string()))?;
        std::fs::write(&path, text)
            .map_err(|e| ReviewError::State(format!("{}: {e}", path.display())))?;
        tracing::debug!(path = %path.display(), sessions = self.sessions.len(), "saved state");
        Ok(path)
    }
}
