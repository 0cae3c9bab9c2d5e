//! JSONL review trail.
//!
//! Appends one [`TrailRecord`] per applied mutation to
//! `{trail_dir}/{project_id}.jsonl` via `serde_jsonlines::append_json_lines`.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::ReviewError;
use crate::observer::{ReviewEvent, ReviewObserver};
use crate::session::ReviewSession;

pub const TRAIL_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct TrailRecord {
    pub v: u32,
    pub ts: DateTime<Utc>,
    pub project_id: u32,
    pub event: ReviewEvent,
}

pub struct TrailObserver {
    trail_dir: PathBuf,
    enabled: bool,
}

impl TrailObserver {
    /// Creates the trail directory if it doesn't exist.
    ///
    /// # Errors
    ///
    /// Returns `ReviewError::State` if the directory cannot be created.
    pub fn new(trail_dir: PathBuf) -> Result<Self, ReviewError> {
        std::fs::create_dir_all(&trail_dir)
            .map_err(|e| ReviewError::State(format!("{}: {e}", trail_dir.display())))?;
        Ok(Self {
            trail_dir,
            enabled: true,
        })
    }

    #[must_use]
    pub const fn disabled() -> Self {
        Self {
            trail_dir: PathBuf::new(),
            enabled: false,
        }
    }

    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.enabled
    }

    #[must_use]
    pub fn path_for(&self, project_id: u32) -> PathBuf {
        self.trail_dir.join(format!("{project_id}.jsonl"))
    }

    /// Append one record to the project's trail file.
    ///
    /// # Errors
    ///
    /// Returns `ReviewError::State` if the write fails.
    pub fn append(&self, event: &ReviewEvent) -> Result<(), ReviewError> {
        if !self.enabled {
            return Ok(());
        }
        let record = TrailRecord {
            v: TRAIL_VERSION,
            ts: Utc::now(),
            project_id: event.project_id,
            event: event.clone(),
        };
        serde_jsonlines::append_json_lines(self.path_for(event.project_id), [&record])
            .map_err(|e| ReviewError::State(e.to_string()))
    }

    /// Read a project's trail back, oldest first. A missing file is an empty
    /// trail.
    ///
    /// # Errors
    ///
    /// Returns `ReviewError::State` on unreadable or malformed lines, or a
    /// record with an unsupported version.
    pub fn read(&self, project_id: u32) -> Result<Vec<TrailRecord>, ReviewError> {
        let path = self.path_for(project_id);
        if !path.exists() {
            return Ok(Vec::new());
        }
        let records: Vec<TrailRecord> = serde_jsonlines::json_lines(&path)
            .map_err(|e| ReviewError::State(e.to_string()))?
            .collect::<Result<_, _>>()
            .map_err(|e| ReviewError::State(e.to_string()))?;

        if let Some(bad) = records.iter().find(|r| r.v != TRAIL_VERSION) {
            return Err(ReviewError::State(format!(
                "unsupported trail version {} in {}",
                bad.v,
                path.display()
            )));
        }
        Ok(records)
    }
}

impl ReviewObserver for TrailObserver {
    fn on_event(&mut self, event: &ReviewEvent, _session: &ReviewSession) {
        if let Err(e) = self.append(event) {
            tracing::warn!(
                project_id = event.project_id,
                action = %event.action,
                "failed to append review trail: {e}"
            );
        }
    }
}
